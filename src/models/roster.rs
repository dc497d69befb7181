//! 名单行模型
//!
//! CSV 按列位置取值：0=姓名, 1=团队, 3=引言(邮箱), 7=Roblox 用户名

/// 少于这么多列的行直接跳过
pub const MIN_FIELDS: usize = 4;

const NAME_COLUMN: usize = 0;
const TEAM_COLUMN: usize = 1;
const QUOTE_COLUMN: usize = 3;
const USERNAME_COLUMN: usize = 7;

/// CSV 中的一条原始记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    /// 行号（从 1 开始，表头是第 1 行）
    pub line_number: usize,
    pub fields: Vec<String>,
}

impl RosterLine {
    pub fn new<I, S>(line_number: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            line_number,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// 解析后的名单行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub line_number: usize,
    pub name: String,
    pub team: String,
    pub quote: String,
    /// Roblox 用户名，空字符串视为没有
    pub username: Option<String>,
}

impl RosterRow {
    /// 解析一条记录，列数不足或姓名为空时返回 `None`
    pub fn parse(line: &RosterLine) -> Option<Self> {
        if line.fields.len() < MIN_FIELDS {
            return None;
        }

        let field = |idx: usize| {
            line.fields
                .get(idx)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let name = field(NAME_COLUMN);
        if name.is_empty() {
            return None;
        }

        let username = Some(field(USERNAME_COLUMN)).filter(|u| !u.is_empty());

        Some(Self {
            line_number: line.line_number,
            name,
            team: field(TEAM_COLUMN),
            quote: field(QUOTE_COLUMN),
            username,
        })
    }
}
