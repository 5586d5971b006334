use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

#[derive(ramhorns::Content)]
struct BasePage<'a> {
    subreddit: &'a str,
    date_ymd: &'a str,
    date_full: &'a str,
    content: &'a str,
}

/// The outer HTML shell every generated page goes through.
pub struct PageRenderer {
    template: Template<'static>,
}

impl PageRenderer {
    pub fn new(base_tpl_src: String) -> io::Result<PageRenderer> {
        let template = match Template::new(base_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing base page template: {}", e),
                ));
            }
        };

        Ok(PageRenderer { template })
    }

    pub fn render(&self, subreddit: &str, date_ymd: &str, date_full: &str, content: &str) -> String {
        self.template.render(&BasePage {
            subreddit,
            date_ymd,
            date_full,
            content,
        })
    }
}

#[derive(ramhorns::Content)]
struct LetterInner<'a> {
    nav_top: &'a str,
    letter_content: &'a str,
    nav_bottom: &'a str,
}

pub struct LetterRenderer {
    template: Template<'static>,
}

impl LetterRenderer {
    pub fn new(letter_tpl_src: String) -> io::Result<LetterRenderer> {
        let template = match Template::new(letter_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing letter template: {}", e),
                ));
            }
        };

        Ok(LetterRenderer { template })
    }

    pub fn render(&self, nav: &str, letter_content: &str) -> String {
        self.template.render(&LetterInner {
            nav_top: nav,
            letter_content,
            nav_bottom: nav,
        })
    }
}

#[derive(ramhorns::Content)]
struct NavBar<'a> {
    links: &'a str,
}

pub struct NavRenderer {
    template: Template<'static>,
}

impl NavRenderer {
    pub fn new(nav_tpl_src: String) -> io::Result<NavRenderer> {
        let template = match Template::new(nav_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing navigation template: {}", e),
                ));
            }
        };

        Ok(NavRenderer { template })
    }

    /// Boundary pages keep their place in the bar as a greyed-out label
    /// instead of a link.
    pub fn render(&self, prev: Option<&str>, next: Option<&str>, catalog_url: &str) -> String {
        let mut links = Vec::with_capacity(3);

        match prev {
            Some(url) => links.push(format!(r#"<a href="{}">Previous</a>"#, url)),
            None => links.push(r#"<span style="color: grey;">Previous</span>"#.to_string()),
        }
        links.push(format!(r#"<a href="{}">Catalog</a>"#, catalog_url));
        match next {
            Some(url) => links.push(format!(r#"<a href="{}">Next</a>"#, url)),
            None => links.push(r#"<span style="color: grey;">Next</span>"#.to_string()),
        }

        self.template.render(&NavBar {
            links: &links.join(" | "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_base_page() {
        let template_src = r##"
SUBREDDIT=[{{subreddit}}]
DATE_YMD=[{{date_ymd}}]
DATE_FULL=[{{date_full}}]
CONTENT=[{{{content}}}]
"##;
        let renderer = PageRenderer::new(template_src.to_string()).unwrap();
        let res = renderer.render(
            "wallstreetbets",
            "2026-02-01",
            "February 01, 2026",
            "<p>Bulls & bears</p>",
        );
        assert_eq!(
            res,
            r##"
SUBREDDIT=[wallstreetbets]
DATE_YMD=[2026-02-01]
DATE_FULL=[February 01, 2026]
CONTENT=[<p>Bulls & bears</p>]"##
        );
    }

    #[test]
    fn test_render_letter_inner() {
        let renderer =
            LetterRenderer::new("{{{nav_top}}}[{{{letter_content}}}]{{{nav_bottom}}}".to_string())
                .unwrap();
        let res = renderer.render("<nav/>", "<p>letter</p>");
        assert_eq!(res, "<nav/>[<p>letter</p>]<nav/>");
    }

    #[test]
    fn test_render_nav_both_neighbors() {
        let renderer = NavRenderer::new("<nav>{{{links}}}</nav>".to_string()).unwrap();
        let res = renderer.render(Some("2026-01-01.html"), Some("2026-01-30.html"), "catalog.html");
        assert_eq!(
            res,
            r#"<nav><a href="2026-01-01.html">Previous</a> | <a href="catalog.html">Catalog</a> | <a href="2026-01-30.html">Next</a></nav>"#
        );
    }

    #[test]
    fn test_render_nav_boundaries_are_disabled() {
        let renderer = NavRenderer::new("{{{links}}}".to_string()).unwrap();

        let first = renderer.render(None, Some("2026-01-15.html"), "catalog.html");
        assert!(first.starts_with(r#"<span style="color: grey;">Previous</span>"#));

        let last = renderer.render(Some("2026-01-15.html"), None, "catalog.html");
        assert!(last.ends_with(r#"<span style="color: grey;">Next</span>"#));
    }
}
