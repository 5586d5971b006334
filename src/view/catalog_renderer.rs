use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

#[derive(ramhorns::Content)]
struct CatalogPage {
    items: Vec<CatalogItem>,
}

#[derive(ramhorns::Content)]
pub struct CatalogItem {
    pub url: String,
    pub label: String,
}

/// Renders the reverse-chronological index of every letter.
pub struct CatalogRenderer {
    template: Template<'static>,
}

impl CatalogRenderer {
    pub fn new(catalog_tpl_src: String) -> io::Result<CatalogRenderer> {
        let template = match Template::new(catalog_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("Error parsing catalog template: {}", e),
                ));
            }
        };

        Ok(CatalogRenderer { template })
    }

    pub fn render(&self, items: Vec<CatalogItem>) -> String {
        self.template.render(&CatalogPage { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_catalog() {
        let template_src =
            r##"<ul>{{#items}}<li><a href="{{url}}">{{label}}</a></li>{{/items}}</ul>"##;
        let renderer = CatalogRenderer::new(template_src.to_string()).unwrap();
        let items = vec![
            CatalogItem {
                url: "2026-01-30.html".to_string(),
                label: "January 30, 2026 - Bulls On Parade".to_string(),
            },
            CatalogItem {
                url: "2026-01-15.html".to_string(),
                label: "January 15, 2026 - Sideways Chop".to_string(),
            },
        ];
        let res = renderer.render(items);
        assert_eq!(
            res,
            r##"<ul><li><a href="2026-01-30.html">January 30, 2026 - Bulls On Parade</a></li><li><a href="2026-01-15.html">January 15, 2026 - Sideways Chop</a></li></ul>"##
        );
    }

    #[test]
    fn test_render_empty_catalog() {
        let template_src = r##"<ul>{{#items}}<li>{{label}}</li>{{/items}}</ul>"##;
        let renderer = CatalogRenderer::new(template_src.to_string()).unwrap();
        assert_eq!(renderer.render(vec![]), "<ul></ul>");
    }
}
