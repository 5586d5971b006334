use std::io::Cursor;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>Hindsight Capital Management</title>
  <link>https://hindsight.example.com</link>
  <description>Daily market summaries from r/wallstreetbets</description>
  <language>en-us</language>
  <item>
    <title>Bulls On Parade</title>
    <link>https://hindsight.example.com/2026-01-30.html</link>
    <guid isPermaLink="true">https://hindsight.example.com/2026-01-30.html</guid>
    <pubDate>Fri, 30 Jan 2026 00:00:00 +0000</pubDate>
    <description><![CDATA[<p>...</p>]]></description>
  </item>
</channel>

</rss>
*/

pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub date: NaiveDate,
    pub html: String,
}

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, items: &[FeedItem]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        // <?xml version="1.0" encoding="UTF-8" ?>
        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        // <rss version="2.0">
        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        // <channel>
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;
        push_text(&mut writer, "language", "en-us")?;

        for item in items {
            // <item>
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", item.title.as_str())?;
            push_text(&mut writer, "link", item.link.as_str())?;

            // The link doubles as the globally-unique id
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(item.link.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            // Letters carry no publication clock, so pin midnight UTC
            let midnight = Utc.from_utc_datetime(&item.date.and_time(NaiveTime::MIN));
            push_text(&mut writer, "pubDate", &midnight.to_rfc2822())?;

            push_cdata(&mut writer, "description", item.html.as_str())?;

            // </item>
            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        // </channel>
        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        // </rss>
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use super::*;

    fn create_item(day: u32, title: &str) -> FeedItem {
        let date = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
        FeedItem {
            title: title.to_string(),
            link: format!("https://hindsight.example.com/2026-01-{:02}.html", day),
            date,
            html: format!("<p>letter of day {}</p>", day),
        }
    }

    #[test]
    fn render_xml() {
        let items = vec![create_item(30, "Bulls On Parade"), create_item(15, "Sideways Chop")];

        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://hindsight.example.com",
            ch_desc: "Daily letters",
        };
        let xml = rss.render(&items).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_xml_escapes_cdata_terminator() {
        let mut item = create_item(15, "tricky");
        item.html = "<p>a ]]> b</p>".to_string();
        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://hindsight.example.com",
            ch_desc: "Daily letters",
        };
        let xml = rss.render(&[item]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(xml.contains("<![CDATA[<p>a ]] > b</p>]]>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://hindsight.example.com</link><description>Daily letters</description><language>en-us</language><item><title>Bulls On Parade</title><link>https://hindsight.example.com/2026-01-30.html</link><guid isPermaLink="true">https://hindsight.example.com/2026-01-30.html</guid><pubDate>Fri, 30 Jan 2026 00:00:00 +0000</pubDate><description><![CDATA[<p>letter of day 30</p>]]></description></item><item><title>Sideways Chop</title><link>https://hindsight.example.com/2026-01-15.html</link><guid isPermaLink="true">https://hindsight.example.com/2026-01-15.html</guid><pubDate>Thu, 15 Jan 2026 00:00:00 +0000</pubDate><description><![CDATA[<p>letter of day 15</p>]]></description></item></channel></rss>"##;
}
