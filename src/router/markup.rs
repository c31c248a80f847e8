//! Minimal HTML scanning: just enough to lift the content region out of a
//! fetched page without building a DOM.

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tag<'a> {
    Start {
        name: &'a str,
        attrs: &'a str,
        self_closing: bool,
        /// Byte offset just past the closing `>`.
        end: usize,
    },
    End {
        name: &'a str,
        /// Byte offset of the `<`.
        at: usize,
    },
}

/// Inner markup of the element whose `id` is `region_id`, or `None` when the
/// page has no such element or it is never closed.
pub fn extract_content_region<'a>(markup: &'a str, region_id: &str) -> Option<&'a str> {
    let mut cursor = 0;
    while let Some(tag) = next_tag(markup, &mut cursor) {
        let Tag::Start {
            name,
            attrs,
            self_closing,
            end,
        } = tag
        else {
            continue;
        };
        if attr_value(attrs, "id") != Some(region_id) {
            continue;
        }
        if self_closing || is_void(name) {
            return Some("");
        }
        let close = matching_close(markup, name, &mut cursor)?;
        return Some(&markup[end..close]);
    }
    None
}

/// Number of start tags carrying attribute `name`.
pub fn count_elements_with_attr(markup: &str, name: &str) -> usize {
    let mut cursor = 0;
    let mut count = 0;
    while let Some(tag) = next_tag(markup, &mut cursor) {
        if let Tag::Start { attrs, .. } = tag
            && has_attr(attrs, name)
        {
            count += 1;
        }
    }
    count
}

/// Values of attribute `name` in document order. Bare attributes yield `""`.
pub fn attribute_values<'a>(markup: &'a str, name: &str) -> Vec<&'a str> {
    let mut cursor = 0;
    let mut values = Vec::new();
    while let Some(tag) = next_tag(markup, &mut cursor) {
        if let Tag::Start { attrs, .. } = tag
            && let Some((_, value)) =
                attributes(attrs).find(|(attr, _)| attr.eq_ignore_ascii_case(name))
        {
            values.push(value.unwrap_or_default());
        }
    }
    values
}

/// Next start or end tag at or after `cursor`. Comments, doctypes and the
/// bodies of `<script>`/`<style>` are skipped.
fn next_tag<'a>(markup: &'a str, cursor: &mut usize) -> Option<Tag<'a>> {
    loop {
        let rest = markup.get(*cursor..)?;
        let open = rest.find('<')? + *cursor;
        let after = &markup[open + 1..];

        if after.starts_with("!--") {
            *cursor = match after.find("-->") {
                Some(end) => open + 1 + end + 3,
                None => markup.len(),
            };
            continue;
        }

        let (is_end, name_from) = match after.strip_prefix('/') {
            Some(_) => (true, open + 2),
            None => (false, open + 1),
        };
        let head = &markup[name_from..];
        if !head.starts_with(|c: char| c.is_ascii_alphabetic()) {
            *cursor = open + 1;
            continue;
        }

        let name_len = head
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(head.len());
        let name = &head[..name_len];
        let attrs_start = name_from + name_len;
        let Some(close) = find_tag_end(markup, attrs_start) else {
            *cursor = markup.len();
            return None;
        };
        let end = close + 1;

        if is_end {
            *cursor = end;
            return Some(Tag::End { name, at: open });
        }

        let raw_attrs = markup[attrs_start..close].trim_end();
        let self_closing = raw_attrs.ends_with('/');
        let attrs = raw_attrs.trim_end_matches('/');

        *cursor = if RAW_TEXT_ELEMENTS
            .iter()
            .any(|raw| raw.eq_ignore_ascii_case(name))
        {
            skip_raw_text(markup, name, end)
        } else {
            end
        };

        return Some(Tag::Start {
            name,
            attrs,
            self_closing,
            end,
        });
    }
}

/// Offset of the `>` closing a tag, honouring quoted attribute values.
fn find_tag_end(markup: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (offset, c) in markup[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(from + offset),
            (None, _) => {}
        }
    }
    None
}

/// Offset of the `</name` that ends a raw-text element starting at `from`.
fn skip_raw_text(markup: &str, name: &str, from: usize) -> usize {
    let mut search = from;
    while let Some(found) = markup[search..].find("</") {
        let at = search + found;
        let candidate = &markup[at + 2..];
        if candidate
            .get(..name.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
        {
            return at;
        }
        search = at + 2;
    }
    markup.len()
}

/// Offset of the end tag balancing an already-consumed `<name>` start tag.
fn matching_close(markup: &str, name: &str, cursor: &mut usize) -> Option<usize> {
    let mut depth = 1usize;
    while let Some(tag) = next_tag(markup, cursor) {
        match tag {
            Tag::Start {
                name: inner,
                self_closing: false,
                ..
            } if inner.eq_ignore_ascii_case(name) => depth += 1,
            Tag::End { name: inner, at } if inner.eq_ignore_ascii_case(name) => {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
            _ => {}
        }
    }
    None
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

fn attributes(attrs: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    let mut rest = attrs;
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let name_len = rest
            .find(|c: char| c == '=' || c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        rest = rest[name_len..].trim_start();

        if !rest.starts_with('=') {
            return Some((name, None));
        }
        rest = rest[1..].trim_start();

        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                let len = body.find(quote).unwrap_or(body.len());
                let value = &body[..len];
                rest = body.get(len + 1..).unwrap_or_default();
                value
            }
            _ => {
                let len = rest
                    .find(|c: char| c.is_ascii_whitespace())
                    .unwrap_or(rest.len());
                let value = &rest[..len];
                rest = &rest[len..];
                value
            }
        };
        Some((name, Some(value)))
    })
}

fn attr_value<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attributes(attrs)
        .find(|(attr, _)| attr.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| value)
}

fn has_attr(attrs: &str, name: &str) -> bool {
    attributes(attrs).any(|(attr, _)| attr.eq_ignore_ascii_case(name))
}
