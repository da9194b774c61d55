pub struct Icons;

impl Icons {
    pub const QUESTION: &str = "❓";
    pub const REPLY: &str = "💬";
    pub const PERSON: &str = "👤";
    pub const EYE: &str = "👀";
    pub const HEART: &str = "❤️";
    pub const STAR: &str = "⭐";
    pub const STATS: &str = "📊";
    pub const DATABASE: &str = "🗄️";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const EMPTY: &str = "∅";
}
