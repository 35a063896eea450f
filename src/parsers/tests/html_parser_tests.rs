use crate::parsers::{DocumentParser, HtmlDocumentParser, html};
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.org/team/index.html").unwrap()
    }

    #[test]
    fn test_parse_text_and_links() {
        let html_content = "<html><body><p>Hello, world!</p><a href=\"https://example.com\">Link</a></body></html>";
        let result = html::parse(html_content, &base());
        assert_eq!(result.text, "Hello, world! Link");
        assert_eq!(result.links, vec!["https://example.com/".to_string()]);
        assert!(result.images.is_empty());
    }

    #[test]
    fn test_relative_references_are_resolved() {
        let html_content = r#"<html><body>
            <a href="jane.html">Jane</a>
            <a href="/about">About</a>
            <a href="../news/?page=2#top">News</a>
            <img src="photos/jane.jpg">
            <img src="//cdn.example.net/logo.png">
        </body></html>"#;
        let result = html::parse(html_content, &base());
        assert_eq!(
            result.links,
            vec![
                "https://example.org/team/jane.html".to_string(),
                "https://example.org/about".to_string(),
                "https://example.org/news/?page=2#top".to_string(),
            ]
        );
        assert_eq!(
            result.images,
            vec![
                "https://example.org/team/photos/jane.jpg".to_string(),
                "https://cdn.example.net/logo.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_images_without_src_are_skipped() {
        let html_content = r#"<body><img alt="none"><img src=""><img src="a.png"></body>"#;
        let result = html::parse(html_content, &base());
        assert_eq!(result.images, vec!["https://example.org/team/a.png".to_string()]);
    }

    #[test]
    fn test_anchors_without_href_are_skipped() {
        let html_content = r#"<body><a name="top">Top</a><a href="b.html">B</a></body>"#;
        let result = html::parse(html_content, &base());
        assert_eq!(result.links, vec!["https://example.org/team/b.html".to_string()]);
    }

    #[test]
    fn test_script_and_style_text_is_excluded() {
        let html_content = r#"<html><head><title>Our Team</title>
            <style>p { color: red; }</style>
            <script>var contact = "bot@example.com";</script></head>
            <body><p>  Jane   Doe  </p><noscript>Enable JS</noscript><p>Director</p></body></html>"#;
        let result = html::parse(html_content, &base());
        assert_eq!(result.text, "Our Team Jane   Doe Director");
    }

    #[test]
    fn test_document_parser_trait() {
        let parser = HtmlDocumentParser;
        let result = parser
            .parse("<p>Only text</p>", &base())
            .expect("parse should succeed");
        assert_eq!(result.text, "Only text");
        assert!(result.links.is_empty());
        assert!(result.images.is_empty());
    }
}
