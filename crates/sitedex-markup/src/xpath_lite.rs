//! Translates the restricted subset of XPath location expressions this
//! system's extractors use (absolute paths of `tag` or `tag[@attr='val']`
//! steps, e.g. `//div[@id='content']/h1`) into a CSS selector, so they can
//! be evaluated against an HTML tree with [`scraper`] the same way they'd
//! be evaluated against an XML tree with `sxd_xpath`.

use anyhow::{anyhow, Result};

/// Translates `expr` into an equivalent CSS selector string.
pub fn to_css(expr: &str) -> Result<String> {
    let steps: Vec<&str> = expr.split('/').filter(|s| !s.is_empty()).collect();
    if steps.is_empty() {
        return Err(anyhow!("empty location expression"));
    }

    let mut compounds = Vec::with_capacity(steps.len());
    for step in steps {
        compounds.push(translate_step(step)?);
    }
    Ok(compounds.join(" > "))
}

fn translate_step(step: &str) -> Result<String> {
    let bracket = step.find('[');
    let (tag, mut rest) = match bracket {
        Some(idx) => (&step[..idx], &step[idx..]),
        None => (step, ""),
    };

    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '*' || c == '-') {
        return Err(anyhow!("unsupported XPath step: '{step}'"));
    }

    let mut css = if tag == "*" { String::new() } else { tag.to_string() };

    while let Some(stripped) = rest.strip_prefix('[') {
        let end = stripped
            .find(']')
            .ok_or_else(|| anyhow!("unterminated predicate in step '{step}'"))?;
        let predicate = &stripped[..end];
        css.push_str(&translate_predicate(predicate)?);
        rest = &stripped[end + 1..];
    }

    if !rest.is_empty() {
        return Err(anyhow!("trailing content in step '{step}'"));
    }

    Ok(css)
}

fn translate_predicate(predicate: &str) -> Result<String> {
    let predicate = predicate
        .strip_prefix('@')
        .ok_or_else(|| anyhow!("unsupported predicate: '{predicate}'"))?;

    let eq = predicate
        .find('=')
        .ok_or_else(|| anyhow!("unsupported predicate: '@{predicate}'"))?;
    let attr = &predicate[..eq];
    let value = predicate[eq + 1..].trim_matches(|c| c == '\'' || c == '"');

    Ok(if attr == "id" {
        format!("#{value}")
    } else if attr == "class" {
        format!(".{value}")
    } else {
        format!("[{attr}=\"{value}\"]")
    })
}
