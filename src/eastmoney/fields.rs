//! 各端點的欄位表：上游欄位鍵對輸出欄名，順序即輸出順序。

pub(crate) type FieldTable = &'static [(&'static str, &'static str)];

/// 榜單與最新行情（clist / ulist.np）
pub(crate) const QUOTE: FieldTable = &[
    ("f12", "代码"),
    ("f14", "名称"),
    ("f3", "涨跌幅"),
    ("f2", "最新价"),
    ("f15", "最高"),
    ("f16", "最低"),
    ("f17", "今开"),
    ("f4", "涨跌额"),
    ("f8", "换手率"),
    ("f10", "量比"),
    ("f9", "动态市盈率"),
    ("f5", "成交量"),
    ("f6", "成交额"),
    ("f18", "昨日收盘"),
    ("f20", "总市值"),
    ("f21", "流通市值"),
    ("f13", "市场编号"),
    ("f124", "更新时间戳"),
    ("f297", "最新交易日"),
];

/// 日線以上 K 線
pub(crate) const KLINE: FieldTable = &[
    ("f51", "日期"),
    ("f52", "开盘"),
    ("f53", "收盘"),
    ("f54", "最高"),
    ("f55", "最低"),
    ("f56", "成交量"),
    ("f57", "成交额"),
    ("f58", "振幅"),
    ("f59", "涨跌幅"),
    ("f60", "涨跌额"),
    ("f61", "换手率"),
];

/// 近 n 天 1 分鐘 K 線
pub(crate) const KLINE_NDAYS: FieldTable = &[
    ("f51", "日期"),
    ("f52", "开盘"),
    ("f53", "收盘"),
    ("f54", "最高"),
    ("f55", "最低"),
    ("f56", "成交量"),
    ("f57", "成交额"),
];

/// 歷史資金流（日級）
pub(crate) const HISTORY_BILL: FieldTable = &[
    ("f51", "日期"),
    ("f52", "主力净流入"),
    ("f53", "小单净流入"),
    ("f54", "中单净流入"),
    ("f55", "大单净流入"),
    ("f56", "超大单净流入"),
    ("f57", "主力净流入占比"),
    ("f58", "小单流入净占比"),
    ("f59", "中单流入净占比"),
    ("f60", "大单流入净占比"),
    ("f61", "超大单流入净占比"),
    ("f62", "收盘价"),
    ("f63", "涨跌幅"),
];

/// 當日分鐘級資金流，上游回的欄位串只取前六段
pub(crate) const TODAY_BILL: FieldTable = &[
    ("f51", "时间"),
    ("f52", "主力净流入"),
    ("f53", "小单净流入"),
    ("f54", "中单净流入"),
    ("f55", "大单净流入"),
    ("f56", "超大单净流入"),
];

/// 個別證券基本資料（stock/get）
pub(crate) const BASE_INFO: FieldTable = &[
    ("f57", "代码"),
    ("f58", "名称"),
    ("f162", "市盈率(动)"),
    ("f167", "市净率"),
    ("f127", "所处行业"),
    ("f116", "总市值"),
    ("f117", "流通市值"),
    ("f198", "板块编号"),
    ("f173", "ROE"),
    ("f187", "净利率"),
    ("f105", "净利润"),
    ("f186", "毛利率"),
];

/// 成交明細，上游每列為 `时间,成交价,成交量,单数,...`
pub(crate) const DEAL_DETAIL: FieldTable = &[
    ("f51", "时间"),
    ("f52", "成交价"),
    ("f53", "成交量"),
    ("f54", "单数"),
];

/// 可轉債報表（RPT_BOND_CB_LIST）
pub(crate) const BOND_BASE_INFO: FieldTable = &[
    ("SECURITY_CODE", "债券代码"),
    ("SECURITY_NAME_ABBR", "债券名称"),
    ("CONVERT_STOCK_CODE", "正股代码"),
    ("SECURITY_SHORT_NAME", "正股名称"),
    ("RATING", "债券评级"),
    ("PUBLIC_START_DATE", "申购日期"),
    ("ACTUAL_ISSUE_SCALE", "发行规模(亿)"),
    ("ONLINE_GENERAL_LWR", "网上发行中签率(%)"),
    ("LISTING_DATE", "上市日期"),
    ("EXPIRE_DATE", "到期日期"),
    ("BOND_EXPIRE", "期限(年)"),
    ("INTEREST_RATE_EXPLAIN", "利率说明"),
];

/// 前十大流通股東
pub(crate) const HOLDER: FieldTable = &[
    ("GuDongDaiMa", "股东代码"),
    ("GuDongMingCheng", "股东名称"),
    ("ChiGuShu", "持股数"),
    ("ChiGuBiLi", "持股比例"),
    ("ZengJian", "增减"),
    ("BianDongBiLi", "变动率"),
];

/// 基金歷史淨值
pub(crate) const FUND_NET_VALUE: FieldTable = &[
    ("FSRQ", "日期"),
    ("DWJZ", "单位净值"),
    ("LJJZ", "累计净值"),
    ("JZZZL", "涨跌幅"),
];

/// 基金即時估算漲跌
pub(crate) const FUND_RATE: FieldTable = &[
    ("FCODE", "基金代码"),
    ("SHORTNAME", "基金名称"),
    ("ACCNAV", "最新净值"),
    ("PDATE", "最新净值公开日期"),
    ("GZTIME", "估算时间"),
    ("GSZZL", "估算涨跌幅"),
];

/// 基金基本資料
pub(crate) const FUND_BASE_INFO: FieldTable = &[
    ("FCODE", "基金代码"),
    ("SHORTNAME", "基金简称"),
    ("ESTABDATE", "成立日期"),
    ("RZDF", "涨跌幅"),
    ("DWJZ", "最新净值"),
    ("JJGS", "基金公司"),
    ("FSRQ", "净值更新日期"),
    ("COMMENTS", "简介"),
];

/// 基金持倉
pub(crate) const FUND_POSITION: FieldTable = &[
    ("GPDM", "股票代码"),
    ("GPJC", "股票简称"),
    ("JZBL", "持仓占比"),
    ("PCTNVCHG", "较上期变化"),
];

/// 基金資產類型占比
pub(crate) const FUND_TYPES: FieldTable = &[
    ("GP", "股票比重"),
    ("ZQ", "债券比重"),
    ("HB", "现金比重"),
    ("JZC", "总规模(亿元)"),
    ("QT", "其他比重"),
];

/// 基金行業分布
pub(crate) const FUND_INDUSTRY: FieldTable = &[
    ("HYMC", "行业名称"),
    ("ZJZBL", "持仓比例"),
    ("FSRQ", "公布日期"),
    ("SZ", "市值"),
];

/// 基金階段漲跌
pub(crate) const FUND_PERIOD: FieldTable = &[
    ("title", "时间段"),
    ("syl", "收益率"),
    ("avg", "同类平均"),
    ("rank", "同类排行"),
    ("sc", "同类总数"),
];
