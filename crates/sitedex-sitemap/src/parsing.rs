//! Parses sitemap XML: strips namespaces, then reads `loc`/`lastmod`/
//! `changefreq`/`priority`/`target` text children off each item node.

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use sxd_xpath::{Context, Factory, Value as XValue};

use sitedex_types::UrlInfo;

const PROPERTIES: &[&str] = &["loc", "lastmod", "changefreq", "priority", "target"];

/// What kind of sitemap document a root element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    SitemapIndex,
    UrlSet,
}

pub struct ParsedSitemap {
    pub kind: RootKind,
    pub url_infos: Vec<UrlInfo>,
}

/// Parses `xml` (already namespace-stripped, or not — namespaces are
/// stripped here too, defensively) into a [`ParsedSitemap`].
pub fn parse(xml: &str) -> Result<ParsedSitemap> {
    let stripped = sitedex_markup::namespace::strip_namespaces(xml);
    let package =
        sxd_document::parser::parse(&stripped).map_err(|e| anyhow!("invalid sitemap XML: {e}"))?;
    let document = package.as_document();

    let root_element = document
        .root()
        .children()
        .into_iter()
        .find_map(|child| child.element())
        .ok_or_else(|| anyhow!("sitemap document has no root element"))?;

    let (kind, item_tag) = match root_element.name().local_part() {
        "sitemapindex" => (RootKind::SitemapIndex, "sitemap"),
        "urlset" => (RootKind::UrlSet, "url"),
        other => return Err(anyhow!("unrecognized sitemap root element '{other}'")),
    };

    let factory = Factory::new();
    let context = Context::new();

    let items_xpath = factory
        .build(&format!("//{item_tag}"))?
        .ok_or_else(|| anyhow!("empty item XPath"))?;

    let mut url_infos = Vec::new();
    if let XValue::Nodeset(nodes) = items_xpath.evaluate(&context, document.root())? {
        for node in nodes.iter() {
            url_infos.push(extract_url_info(&factory, &context, *node)?);
        }
    }

    Ok(ParsedSitemap { kind, url_infos })
}

fn extract_url_info<'d>(
    factory: &Factory,
    context: &Context<'d>,
    node: sxd_xpath::nodeset::Node<'d>,
) -> Result<UrlInfo> {
    let mut fields = std::collections::HashMap::new();
    for name in PROPERTIES {
        let xpath = factory
            .build(name)?
            .ok_or_else(|| anyhow!("empty property XPath for '{name}'"))?;
        if let XValue::Nodeset(matches) = xpath.evaluate(context, node)? {
            if let Some(first) = matches.iter().next() {
                fields.insert(*name, first.string_value());
            }
        }
    }

    let loc = fields
        .remove("loc")
        .ok_or_else(|| anyhow!("sitemap item is missing a <loc>"))?;

    let mut url_info = UrlInfo::new(loc);
    url_info.lastmod = fields.get("lastmod").and_then(|s| parse_lastmod(s));
    url_info.changefreq = fields.remove("changefreq");
    url_info.priority = fields.get("priority").and_then(|s| s.parse::<f64>().ok());
    url_info.target = fields.remove("target");
    Ok(url_info)
}

/// Sitemap `lastmod` values are W3C datetimes, which may carry only a date
/// (`2014-12-31`) or a full offset datetime (`2014-12-31T16:45:30+01:00`).
fn parse_lastmod(s: &str) -> Option<chrono::DateTime<Utc>> {
    if let Ok(dt) = sitedex_util::time::from_iso_datetime(s) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
