//! Markup sniffing
//!
//! Cheap scans over raw markup: is this a tag at all, which tag comes
//! first, is it a bare empty tag pair, and expansion of XML-style
//! self-closing tags that HTML would otherwise leave open.

/// Tags that legitimately self-close
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Whether the text contains something shaped like an opening tag
/// (`<name ...>` or `<!name ...>`)
pub fn looks_like_markup(text: &str) -> bool {
    first_tag_name(text).is_some()
}

/// Lowercased name of the first opening tag in the text
pub fn first_tag_name(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(offset) = text[start..].find('<') {
        let mut i = start + offset + 1;
        if bytes.get(i) == Some(&b'!') {
            i += 1;
        }
        let name_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_alphabetic) {
            i += 1;
        }
        if i > name_start && text[i..].contains('>') {
            return Some(text[name_start..i].to_ascii_lowercase());
        }
        start = start + offset + 1;
    }
    None
}

/// If the whole text is `<name></name>`, the tag name
pub(crate) fn empty_tag_pair(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('<')?;
    let name_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    if name_len == 0 {
        return None;
    }
    let (name, rest) = rest.split_at(name_len);
    let closing = rest.strip_prefix("></")?.strip_suffix('>')?;
    closing.eq_ignore_ascii_case(name).then_some(name)
}

/// Rewrite `<tag .../>` to `<tag ...></tag>` for non-void tags
pub(crate) fn expand_self_closing(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tag = &rest[lt..];
        let name_len = tag[1..].bytes().take_while(u8::is_ascii_alphabetic).count();
        let Some(gt) = tag.find('>') else {
            break;
        };

        let name = &tag[1..1 + name_len];
        let self_closing = name_len > 0 && gt > name_len && tag[..gt].ends_with('/');
        let is_void = VOID_TAGS.iter().any(|v| v.eq_ignore_ascii_case(name));

        if self_closing && !is_void {
            out.push_str(&tag[..gt - 1]);
            out.push_str("></");
            out.push_str(name);
            out.push('>');
        } else {
            out.push_str(&tag[..=gt]);
        }
        rest = &tag[gt + 1..];
    }

    out.push_str(rest);
    out
}
