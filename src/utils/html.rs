/// Escapar texto del servidor antes de interpolarlo en HTML
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<div class="alert alert-{kind}">texto</div>`
pub fn alert_html(kind: &str, text: &str) -> String {
    format!(r#"<div class="alert alert-{}">{}</div>"#, kind, escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="alert('1')">&"#),
            "&lt;img src=x onerror=&quot;alert(&#39;1&#39;)&quot;&gt;&amp;"
        );
        assert_eq!(escape_html("Prensa 02 – Galpão"), "Prensa 02 – Galpão");
    }

    #[test]
    fn test_alert_html_escapes_text() {
        assert_eq!(
            alert_html("danger", "<b>x</b>"),
            r#"<div class="alert alert-danger">&lt;b&gt;x&lt;/b&gt;</div>"#
        );
    }
}
