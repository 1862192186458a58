// Static campus directory content

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AcademicLink {
    pub title: &'static str,
    pub url: &'static str,
    pub desc: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DiningHall {
    pub name: &'static str,
    pub dish: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct TransportTip {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AdminService {
    pub icon: &'static str,
    pub title: &'static str,
    pub detail: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category {
        label: "学业导航",
        path: "academic",
        icon: "📚",
        description: "课程表、学术讲座、培养方案与导师信息",
    },
    Category {
        label: "嘉庚食府",
        path: "dining",
        icon: "🍛",
        description: "芙蓉、勤业、南光、望海——经院学子的食堂指南",
    },
    Category {
        label: "校园行踪",
        path: "transport",
        icon: "🚌",
        description: "校车时刻表、共享单车、周边公交与地铁",
    },
    Category {
        label: "办事指南",
        path: "admin",
        icon: "🏢",
        description: "学生证补办、用印申请、奖学金评定流程",
    },
    Category {
        label: "研途伴侣",
        path: "ai-assistant",
        icon: "🤖",
        description: "由 Gemini 驱动的经院生活百科助手",
    },
];

pub const ACADEMIC_INFO: &[AcademicLink] = &[
    AcademicLink {
        title: "WISE/SOE 官网",
        url: "https://soe.xmu.edu.cn",
        desc: "获取最新通知公告、学术讲座的首选地。",
    },
    AcademicLink {
        title: "研究生系统",
        url: "https://yjs.xmu.edu.cn",
        desc: "选课、查成绩、论文提交。",
    },
    AcademicLink {
        title: "图书馆资源",
        url: "https://library.xmu.edu.cn",
        desc: "查找经济学核心期刊及数据库。",
    },
];

pub const ACADEMIC_HIGHLIGHTS_TITLE: &str = "📢 硕博培养近期重点";

pub const ACADEMIC_HIGHLIGHTS: &[&str] = &[
    "博士生中期考核：通常在每年10月至11月进行。",
    "学位论文开题：需经导师同意并在研究生系统提交申请。",
    "WISE学术讲座：每周三下午海安楼，经院学子学术交流圣地。",
];

pub const DINING_HIGHLIGHTS: &[DiningHall] = &[
    DiningHall {
        name: "南光餐厅",
        dish: "南光老婆饼、油条",
        tags: &["早餐必备", "传统老字号"],
    },
    DiningHall {
        name: "勤业餐厅",
        dish: "勤业沙茶面、馒头",
        tags: &["网红打卡", "种类最丰富"],
    },
    DiningHall {
        name: "芙蓉餐厅",
        dish: "二楼手撕鸡、各式小吃",
        tags: &["经院最近", "性价比高"],
    },
    DiningHall {
        name: "望海餐厅",
        dish: "自助餐、行政午餐",
        tags: &["环境优雅", "景观位"],
    },
];

pub const TRANSPORT_TIPS: &[TransportTip] = &[
    TransportTip {
        title: "校本部-翔安校区校车",
        content: "通常在克立楼或大南校门乘车，需提前通过智慧厦大预约。",
    },
    TransportTip {
        title: "周边公交",
        content: "厦大西村站、厦大白城站，直达中山路、思明电影院等。",
    },
    TransportTip {
        title: "校园漫步",
        content: "经院位于石井/南光附近，建议步行或骑行，校内共享单车需规范停放。",
    },
];

pub const ADMIN_TITLE: &str = "办事快捷入口";

pub const ADMIN_SERVICES: &[AdminService] = &[
    AdminService {
        icon: "🖨️",
        title: "自助打印终端",
        detail: "位置：经济大楼一楼大厅、图书馆入口、行政楼",
    },
    AdminService {
        icon: "🛡️",
        title: "户籍证件办理",
        detail: "需先在智慧厦大在线提交申请",
    },
    AdminService {
        icon: "💰",
        title: "奖助学金咨询",
        detail: "经院研究生部（N楼三楼）",
    },
];

/// Persona and knowledge base sent with every assistant request.
pub const SYSTEM_INSTRUCTION: &str = "你是\"厦大经院研伴\"，专门服务于厦门大学经济学院（SOE）和王亚南经济研究院（WISE）的学生。
你需要提供准确、亲切、实用的建议。
核心知识点：
- 地点：经院大楼（经济楼/N楼）、石井宿舍、芙蓉餐厅、南光餐厅。
- 学业：导师制、双学位、学术周、博士生论坛。
- 生活：智慧厦大APP、i厦大、校车预约、图书馆选座。
- 语气：温和、专业、富有学长/学姐的关怀感。";

pub const APP_TITLE: &str = "厦大经院研伴";
pub const APP_SUBTITLE: &str = "XMU Econ Graduate Portal";
pub const CHAT_TITLE: &str = "经院研伴 (Gemini AI)";
pub const CHAT_TAGLINE: &str = "实时解答你的校园疑惑";
pub const INPUT_PLACEHOLDER: &str = "问问我关于南光早餐、选课建议或奖学金...";
pub const DISCLAIMER: &str = "AI 回复仅供参考，具体以学院官方通知为准";

pub fn category(path: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.path == path)
}
