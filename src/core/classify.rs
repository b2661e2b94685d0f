// src/core/classify.rs
//
// Keyword classifier for index names.
// The table below is curated data; `classify` walks it in MATCH_ORDER and the
// first category with a keyword contained in the name wins.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Broad,
    SmallCap,
    Strategy,
    Industry,
    Thematic,
    Overseas,
    Other,
}

impl Category {
    /// Display ranking, also the sort key in the ranked table.
    pub const RANK_ORDER: [Category; 7] = [
        Category::Broad,
        Category::SmallCap,
        Category::Strategy,
        Category::Industry,
        Category::Thematic,
        Category::Overseas,
        Category::Other,
    ];

    pub fn rank(self) -> usize {
        Self::RANK_ORDER.iter().position(|c| *c == self).unwrap_or(Self::RANK_ORDER.len() - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Broad    => "大盘",
            Category::SmallCap => "小盘",
            Category::Strategy => "策略",
            Category::Industry => "行业",
            Category::Thematic => "主题",
            Category::Overseas => "海外",
            Category::Other    => "其他",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Broad    => "broad",
            Category::SmallCap => "smallcap",
            Category::Strategy => "strategy",
            Category::Industry => "industry",
            Category::Thematic => "thematic",
            Category::Overseas => "overseas",
            Category::Other    => "other",
        }
    }

    /// Accepts either the Chinese label or the ASCII key.
    pub fn from_label(s: &str) -> Option<Category> {
        let t = s.trim();
        Self::RANK_ORDER
            .iter()
            .copied()
            .find(|c| c.label() == t || c.key().eq_ignore_ascii_case(t))
    }
}

/// Categories in the order their keywords are tried.
/// Overseas goes first so `恒生科技` isn't caught by the thematic `科技`;
/// strategy precedes broad so `沪深300红利` lands in strategy.
pub const MATCH_ORDER: [Category; 6] = [
    Category::Overseas,
    Category::Strategy,
    Category::SmallCap,
    Category::Broad,
    Category::Industry,
    Category::Thematic,
];

pub fn keywords(cat: Category) -> &'static [&'static str] {
    match cat {
        Category::Overseas => &[
            "恒生", "港股", "香港", "H股", "中概", "纳斯达克", "纳指", "标普", "道琼斯",
            "美国", "美股", "日经", "德国", "法国", "英国", "越南", "印度", "亚太",
            "海外", "全球", "QDII",
        ],
        Category::Strategy => &[
            "红利", "股息", "价值", "成长", "低波", "质量", "基本面", "等权", "动量",
            "高贝塔", "现金流", "自由现金流", "ESG",
        ],
        Category::SmallCap => &[
            "中证500", "中证1000", "中证2000", "国证2000", "小盘", "中小", "微盘",
            "创业板50", "深证中小",
        ],
        Category::Broad => &[
            "沪深300", "上证50", "上证180", "上证380", "中证100", "中证200", "中证800",
            "中证A50", "中证A100", "中证A500", "A500", "深证100", "深证成指", "上证指数",
            "创业板指", "科创50", "科创100", "北证50", "万得全A", "大盘", "MSCI中国A50",
        ],
        Category::Industry => &[
            "医药", "医疗", "生物", "中药", "消费", "食品", "饮料", "白酒", "酒", "家电",
            "银行", "证券", "券商", "保险", "非银", "金融", "地产", "房地产", "建筑",
            "建材", "有色", "金属", "煤炭", "钢铁", "化工", "石油", "石化", "能源",
            "电力", "公用事业", "交通运输", "物流", "汽车", "军工", "国防", "传媒",
            "计算机", "通信", "电子", "半导体", "农业", "养殖", "畜牧", "环保", "机械",
            "基建", "纺织", "旅游",
        ],
        Category::Thematic => &[
            "新能源", "光伏", "锂电", "储能", "碳中和", "芯片", "人工智能", "AI", "机器人",
            "云计算", "大数据", "互联网", "科技", "5G", "游戏", "动漫", "数字经济", "信创",
            "国企改革", "央企", "一带一路", "智能", "创新药", "稀土", "卫星",
        ],
        Category::Other => &[],
    }
}

/// Category for an index name. Pure substring match, no I/O.
pub fn classify(name: &str) -> Category {
    for cat in MATCH_ORDER {
        if keywords(cat).iter().any(|kw| name.contains(kw)) {
            return cat;
        }
    }
    Category::Other
}

/// Industry indices score on PB percentile only.
/// Uses the industry keywords directly, independent of `classify`'s result.
pub fn is_industry(name: &str) -> bool {
    keywords(Category::Industry).iter().any(|kw| name.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_names() {
        assert_eq!(classify("沪深300"), Category::Broad);
        assert_eq!(classify("中证1000"), Category::SmallCap);
        assert_eq!(classify("中证红利"), Category::Strategy);
        assert_eq!(classify("沪深300红利"), Category::Strategy);
        assert_eq!(classify("中证白酒"), Category::Industry);
        assert_eq!(classify("中证全指证券公司"), Category::Industry);
        assert_eq!(classify("光伏产业"), Category::Thematic);
        assert_eq!(classify("恒生科技"), Category::Overseas);
        assert_eq!(classify("纳斯达克100"), Category::Overseas);
        assert_eq!(classify("Something Else"), Category::Other);
    }

    #[test]
    fn industry_flag_ignores_match_order() {
        assert!(is_industry("中证医疗"));
        assert!(is_industry("恒生医疗"));   // overseas by category, still industry-scored
        assert!(!is_industry("沪深300"));
    }

    #[test]
    fn rank_follows_display_order() {
        assert_eq!(Category::Broad.rank(), 0);
        assert_eq!(Category::Industry.rank(), 3);
        assert_eq!(Category::Other.rank(), 6);
        assert_eq!(Category::from_label("行业"), Some(Category::Industry));
        assert_eq!(Category::from_label("Overseas"), Some(Category::Overseas));
        assert_eq!(Category::from_label("?"), None);
    }
}
