/// Glyph drawn for an icon class name; unknown classes get a bullet
pub fn glyph(icon_class: &str) -> &'static str {
    let name = icon_class
        .split_whitespace()
        .find(|part| part.starts_with("bi-"))
        .unwrap_or("");

    match name {
        "bi-calendar-check" => "📅",
        "bi-clipboard-data" => "📋",
        "bi-diagram-3" | "bi-diagram-3-fill" => "🗺",
        "bi-code-slash" => "💻",
        "bi-bug-fill" => "🐛",
        "bi-rocket-takeoff" => "🚀",
        "bi-tools" => "🔧",
        "bi-search" => "🔍",
        "bi-kanban" => "📊",
        "bi-pencil-square" => "✏",
        "bi-gear-fill" | "bi-gear" => "⚙",
        "bi-play-circle-fill" => "▶",
        "bi-flag-fill" => "🚩",
        "bi-arrow-repeat" => "🔄",
        "bi-shield-check" => "🛡",
        "bi-person" => "👤",
        "bi-person-badge" => "🛎",
        "bi-graph-up" => "📈",
        "bi-lightbulb-fill" => "💡",
        "bi-link-45deg" => "🔗",
        "bi-circle" => "○",
        _ => "•",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph("bi bi-tools"), "🔧");
        assert_eq!(glyph("bi-search"), "🔍");
        assert_eq!(glyph("bi bi-does-not-exist"), "•");
        assert_eq!(glyph(""), "•");
    }
}
