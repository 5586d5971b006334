use std::fs;
use std::path::PathBuf;

use chrono::Local;
use spdlog::{info, warn};

use crate::config::Config;
use crate::error::SiteError;
use crate::letter::{parse_file_date, Letter};
use crate::report::{render_markdown, BASE_TEMPLATE_FILE};
use crate::text_utils::format_long_date;
use crate::view::catalog_renderer::{CatalogItem, CatalogRenderer};
use crate::view::page_renderer::{LetterRenderer, NavRenderer, PageRenderer};
use crate::view::rss_renderer::{FeedItem, RssChannel};

pub const LETTER_TEMPLATE_FILE: &str = "letter_inner.html";
pub const CATALOG_TEMPLATE_FILE: &str = "catalog_inner.html";
pub const NAV_TEMPLATE_FILE: &str = "nav.html";

pub const CATALOG_FILE: &str = "catalog.html";
pub const INDEX_FILE: &str = "index.html";
pub const FEED_FILE: &str = "rss.xml";
pub const DISCLAIMER_FILE: &str = "disclaimer.html";

const FEED_ITEM_LIMIT: usize = 10;

struct Templates {
    base: PageRenderer,
    letter: LetterRenderer,
    catalog: CatalogRenderer,
    nav: NavRenderer,
}

struct RenderedPage {
    date: chrono::NaiveDate,
    url: String,
    title: String,
    display_date: String,
    html: String,
}

/// Regenerates the whole site from the letter archive. Stages run strictly
/// in order and the first failure aborts the run; generated output is fully
/// derived, so a partial tree is repaired by simply running again.
pub struct SiteBuilder<'a> {
    config: &'a Config,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(config: &'a Config) -> SiteBuilder<'a> {
        SiteBuilder { config }
    }

    pub fn build(&self) -> Result<usize, SiteError> {
        let letters = self.discover()?;
        let templates = self.load_templates()?;

        if letters.is_empty() {
            warn!(
                "No letters found in {}",
                self.config.paths.markdown_dir.to_str().unwrap()
            );
        }

        fs::create_dir_all(&self.config.paths.output_dir)?;

        let pages = self.render_pages(&letters, &templates)?;
        self.render_catalog(&pages, &templates)?;
        self.render_redirect(&pages)?;
        self.render_feed(&pages)?;
        self.render_static_pages(&templates)?;

        Ok(pages.len())
    }

    fn discover(&self) -> Result<Vec<Letter>, SiteError> {
        let mut letters = vec![];

        for entry in fs::read_dir(&self.config.paths.markdown_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let file_name = match file_name.to_str() {
                Some(x) => x,
                None => continue,
            };
            if !file_name.to_lowercase().ends_with(".md") {
                continue;
            }

            let path = entry.path();
            match parse_file_date(&path) {
                Some(date) => letters.push(Letter::open(&path, date)?),
                None => warn!("Skipping non-date file: {}", file_name),
            }
        }

        letters.sort_by_key(|letter| letter.date);

        // Two files on the same day means the archive itself is ambiguous,
        // and picking one silently would publish the wrong letter
        for pair in letters.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(SiteError::DuplicateDate {
                    date: pair[0].date,
                    first: pair[0].file_name.clone(),
                    second: pair[1].file_name.clone(),
                });
            }
        }

        Ok(letters)
    }

    fn load_templates(&self) -> Result<Templates, SiteError> {
        let base = PageRenderer::new(self.read_template("base page", BASE_TEMPLATE_FILE)?)?;
        let letter = LetterRenderer::new(self.read_template("letter", LETTER_TEMPLATE_FILE)?)?;
        let catalog = CatalogRenderer::new(self.read_template("catalog", CATALOG_TEMPLATE_FILE)?)?;
        let nav = NavRenderer::new(self.read_template("navigation", NAV_TEMPLATE_FILE)?)?;

        Ok(Templates {
            base,
            letter,
            catalog,
            nav,
        })
    }

    fn read_template(&self, name: &'static str, file_name: &str) -> Result<String, SiteError> {
        let path = self.config.paths.template_dir.join(file_name);
        if !path.exists() {
            return Err(SiteError::TemplateMissing { name, path });
        }
        Ok(fs::read_to_string(&path)?)
    }

    fn render_pages(
        &self,
        letters: &[Letter],
        templates: &Templates,
    ) -> Result<Vec<RenderedPage>, SiteError> {
        let mut pages = Vec::with_capacity(letters.len());

        for (i, letter) in letters.iter().enumerate() {
            let prev = if i > 0 {
                Some(letters[i - 1].output_name())
            } else {
                None
            };
            let next = letters.get(i + 1).map(|l| l.output_name());
            let nav = templates
                .nav
                .render(prev.as_deref(), next.as_deref(), CATALOG_FILE);

            let html = render_markdown(&letter.markdown).map_err(|e| SiteError::Render {
                path: letter.file_name.clone(),
                reason: e.to_string(),
            })?;
            let inner = templates.letter.render(&nav, &html);

            let date_ymd = letter.date.format("%Y-%m-%d").to_string();
            let display_date = letter.display_date();
            let page_html = templates.base.render(
                &self.config.reddit.subreddit,
                &date_ymd,
                &display_date,
                &inner,
            );

            let url = letter.output_name();
            fs::write(self.output_path(&url), &page_html)?;
            info!("Generated {}", url);

            pages.push(RenderedPage {
                date: letter.date,
                url,
                title: letter.title(),
                display_date,
                html,
            });
        }

        Ok(pages)
    }

    fn render_catalog(&self, pages: &[RenderedPage], templates: &Templates) -> Result<(), SiteError> {
        let mut sorted: Vec<&RenderedPage> = pages.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));

        let items = sorted
            .iter()
            .map(|page| CatalogItem {
                url: page.url.clone(),
                label: format!("{} - {}", page.display_date, page.title),
            })
            .collect();
        let inner = templates.catalog.render(items);

        let today = Local::now().date_naive();
        let page_html = templates.base.render(
            &self.config.reddit.subreddit,
            &today.format("%Y-%m-%d").to_string(),
            &format_long_date(today),
            &inner,
        );

        fs::write(self.output_path(CATALOG_FILE), page_html)?;
        info!("Generated {}", CATALOG_FILE);
        Ok(())
    }

    fn render_redirect(&self, pages: &[RenderedPage]) -> Result<(), SiteError> {
        let latest = match pages.iter().max_by_key(|page| page.date) {
            Some(latest) => latest,
            None => return Ok(()),
        };

        let redirect_html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta http-equiv="refresh" content="0; url={url}" />
    <title>Redirecting...</title>
</head>
<body>
    <p>Redirecting to latest letter: <a href="{url}">{url}</a></p>
</body>
</html>
"#,
            url = latest.url
        );

        fs::write(self.output_path(INDEX_FILE), redirect_html)?;
        info!("Generated {} (redirect to {})", INDEX_FILE, latest.url);
        Ok(())
    }

    fn render_feed(&self, pages: &[RenderedPage]) -> Result<(), SiteError> {
        let mut sorted: Vec<&RenderedPage> = pages.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted.truncate(FEED_ITEM_LIMIT);

        let feed = &self.config.feed;
        let items: Vec<FeedItem> = sorted
            .iter()
            .map(|page| FeedItem {
                title: page.title.clone(),
                link: feed_link(&feed.site_url, &page.url),
                date: page.date,
                html: page.html.clone(),
            })
            .collect();

        let channel = RssChannel {
            ch_title: &feed.title,
            ch_link: &feed.site_url,
            ch_desc: &feed.description,
        };
        let xml = channel.render(&items).map_err(|e| SiteError::Render {
            path: PathBuf::from(FEED_FILE),
            reason: e.to_string(),
        })?;

        fs::write(self.output_path(FEED_FILE), xml)?;
        info!("Generated {}", FEED_FILE);
        Ok(())
    }

    fn render_static_pages(&self, templates: &Templates) -> Result<(), SiteError> {
        let today = Local::now().date_naive();
        let page_html = templates.base.render(
            &self.config.reddit.subreddit,
            &today.format("%Y-%m-%d").to_string(),
            &format_long_date(today),
            DISCLAIMER_HTML,
        );

        fs::write(self.output_path(DISCLAIMER_FILE), page_html)?;
        info!("Generated {}", DISCLAIMER_FILE);
        Ok(())
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        self.config.paths.output_dir.join(file_name)
    }
}

fn feed_link(site_url: &str, page_url: &str) -> String {
    format!("{}/{}", site_url.trim_end_matches('/'), page_url)
}

const DISCLAIMER_HTML: &str = r#"
    <h1>Legal Disclaimer</h1>

    <h2>AI-Generated Content Notice</h2>
    <p>The letters on this site are generated by an automated system that summarizes
    publicly available forum discussions. Nothing here is verified for accuracy and
    summaries may misrepresent their source material.</p>

    <h2>Not Financial Advice</h2>
    <p>Nothing on this site constitutes financial, investment, legal, or professional
    advice. The content exists for informational and entertainment purposes only.
    Consult a qualified professional before making any investment decision.</p>

    <h2>No Warranty</h2>
    <p>This site and its content are provided "as is" without warranties of any kind.
    Market data and commentary may be outdated, incomplete, or plain wrong.</p>

    <h2>Investment Risks</h2>
    <p>Investing involves substantial risk of loss. Past performance is not indicative
    of future results. Only invest money you can afford to lose.</p>

    <h2>Use at Your Own Risk</h2>
    <p>By reading this site you acknowledge that any decision you make based on its
    content is your own responsibility.</p>

    <hr>

    <p style="text-align: center; margin-top: 40px;">
        <a href="index.html">Return to Latest Letter</a> &bull; <a href="catalog.html">View All Letters</a>
    </p>
"#;
