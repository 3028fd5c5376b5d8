//! XML encoding and decoding of `urlset` documents.
//!
//! The codec works on plain [`Fields`] mappings and knows nothing about
//! validation; [`SitemapDocument`](crate::SitemapDocument) turns mappings into
//! entries and back.
//!
//! ## Output shapes
//!
//! Pretty output (the default) indents and writes one child element per
//! field, in canonical order:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.google.com/schemas/sitemap/0.84">
//!   <url>
//!     <loc>http://example.com/</loc>
//!     <lastmod>2005-06-03</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! Compact output has no whitespace between elements and writes the
//! recognized fields as attributes of `<url>`. The decoder accepts both.
//!
//! Prefixed namespace declarations on the root (`xmlns:image="..."`) are
//! carried through so prefixed extension elements stay bound.

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::{debug, warn};

use crate::error::{Error, Result, ValidationError};
use crate::fields::{Field, Fields};

const ROOT: &str = "urlset";
const URL: &str = "url";

/// Formatting knobs for [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Indent and write fields as child elements.
    pub pretty: bool,
    /// Spaces per nesting level in pretty mode.
    pub indent: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
        }
    }
}

/// What [`decode`] pulled out of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The root `xmlns` declaration, if present.
    pub namespace: Option<String>,
    /// The root `xmlns:prefix` declarations, in document order.
    pub prefixes: Vec<(String, String)>,
    /// One mapping per `<url>` element, in document order.
    pub urls: Vec<Fields>,
    /// Content that could not be carried over (nested extension elements).
    pub skipped: Vec<ValidationError>,
}

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Serialization(format!("XML write error: {e}"))
}

/// Render a `urlset` document.
///
/// `prefixes` are written as `xmlns:prefix` declarations on the root. Empty
/// values in `urls` are skipped, so no empty elements are produced.
pub fn encode<'a, I>(
    namespace: &str,
    prefixes: &[(String, String)],
    urls: I,
    options: EncodeOptions,
) -> Result<String>
where
    I: IntoIterator<Item = &'a Fields>,
{
    let mut writer = if options.pretty {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let mut root = BytesStart::new(ROOT);
    if !namespace.is_empty() {
        root.push_attribute(("xmlns", namespace));
    }
    for (prefix, uri) in prefixes {
        root.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
    }
    writer.write_event(Event::Start(root)).map_err(xml_error)?;

    for fields in urls {
        if options.pretty {
            write_url_elements(&mut writer, fields)?;
        } else {
            write_url_attributes(&mut writer, fields)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| Error::Serialization(format!("XML output is not UTF-8: {e}")))?;
    if options.pretty {
        xml.push('\n');
    }
    Ok(xml)
}

fn write_url_elements(writer: &mut Writer<Vec<u8>>, fields: &Fields) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(URL)))
        .map_err(xml_error)?;
    for (name, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
        write_text_element(writer, name, value)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(URL)))
        .map_err(xml_error)
}

fn write_url_attributes(writer: &mut Writer<Vec<u8>>, fields: &Fields) -> Result<()> {
    let mut start = BytesStart::new(URL);
    let mut extensions = Vec::new();
    for (name, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
        if name.parse::<Field>().is_ok() {
            start.push_attribute((name, value));
        } else {
            extensions.push((name, value));
        }
    }

    if extensions.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }

    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    for (name, value) in extensions {
        write_text_element(writer, name, value)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(URL)))
        .map_err(xml_error)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

/// Where the decoder currently is inside the document.
enum State {
    /// Before the root element.
    Prolog,
    /// Inside `<urlset>`, between `<url>` elements.
    Urlset,
    /// Inside a `<url>` element.
    Url(Fields),
    /// Inside a field element of a `<url>`, collecting its text.
    Field {
        fields: Fields,
        key: String,
        text: String,
    },
    /// Inside content that is not carried over; `depth` counts open tags.
    Skip { depth: usize, resume: Box<State> },
    /// After `</urlset>`.
    Done,
}

fn parse_error(e: impl std::fmt::Display) -> Error {
    Error::Parse(format!("XML parse error: {e}"))
}

fn element_names(e: &BytesStart<'_>) -> (String, String) {
    (
        String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
    )
}

/// Key used for a field element: recognized fields by local name,
/// extensions by their qualified name.
fn field_key(qualified: String, local: String) -> String {
    if local.parse::<Field>().is_ok() {
        local
    } else {
        qualified
    }
}

/// Recognized field values are trimmed; extension values are opaque.
fn field_value(key: &str, text: &str) -> String {
    if key.parse::<Field>().is_ok() {
        text.trim().to_string()
    } else {
        text.to_string()
    }
}

fn is_blank(t: &BytesText<'_>) -> bool {
    t.iter().all(u8::is_ascii_whitespace)
}

fn attribute_fields(e: &BytesStart<'_>) -> Result<Fields> {
    let mut fields = Fields::new();
    for attr in e.attributes() {
        let attr: Attribute<'_> = attr.map_err(parse_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let local = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(parse_error)?;
        let key = field_key(key, local);
        let value = field_value(&key, &value);
        fields.insert(key, value);
    }
    Ok(fields)
}

/// Collect the default and prefixed namespace declarations of the root.
fn root_declarations(e: &BytesStart<'_>, decoded: &mut Decoded) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr.map_err(parse_error)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(parse_error)?.into_owned();
        if key == "xmlns" {
            decoded.namespace = Some(value);
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            decoded.prefixes.push((prefix.to_string(), value));
        }
    }
    Ok(())
}

/// Parse a `urlset` document into field mappings.
///
/// Zero, one or many `<url>` elements all yield a list. Values of the
/// recognized fields are trimmed once the element closes; extension values
/// are kept verbatim. Anything other than a well-formed document rooted at
/// `urlset` is an [`Error::Parse`].
pub fn decode(xml: &str) -> Result<Decoded> {
    let mut reader = Reader::from_str(xml);

    let mut decoded = Decoded::default();
    let mut state = State::Prolog;

    loop {
        let event = reader.read_event().map_err(parse_error)?;
        state = match (state, event) {
            (State::Prolog, Event::Start(e)) => {
                let (qualified, local) = element_names(&e);
                if local != ROOT {
                    return Err(Error::Parse(format!(
                        "expected <{ROOT}> root element, found <{qualified}>"
                    )));
                }
                root_declarations(&e, &mut decoded)?;
                State::Urlset
            },
            (State::Prolog, Event::Empty(e)) => {
                let (qualified, local) = element_names(&e);
                if local != ROOT {
                    return Err(Error::Parse(format!(
                        "expected <{ROOT}> root element, found <{qualified}>"
                    )));
                }
                root_declarations(&e, &mut decoded)?;
                State::Done
            },
            (State::Prolog, Event::Text(t)) if !is_blank(&t) => {
                return Err(Error::Parse("text content before root element".to_string()));
            },

            (State::Urlset, Event::Start(e)) => {
                let (_, local) = element_names(&e);
                if local == URL {
                    State::Url(attribute_fields(&e)?)
                } else {
                    State::Skip {
                        depth: 1,
                        resume: Box::new(State::Urlset),
                    }
                }
            },
            (State::Urlset, Event::Empty(e)) => {
                let (_, local) = element_names(&e);
                if local == URL {
                    decoded.urls.push(attribute_fields(&e)?);
                }
                State::Urlset
            },
            (State::Urlset, Event::End(_)) => State::Done,

            (State::Url(fields), Event::Start(e)) => {
                let (qualified, local) = element_names(&e);
                State::Field {
                    fields,
                    key: field_key(qualified, local),
                    text: String::new(),
                }
            },
            (State::Url(mut fields), Event::Empty(e)) => {
                let (qualified, local) = element_names(&e);
                let key = field_key(qualified, local);
                if !fields.contains_key(&key) {
                    fields.insert(key, "");
                }
                State::Url(fields)
            },
            (State::Url(fields), Event::End(_)) => {
                decoded.urls.push(fields);
                State::Urlset
            },

            (State::Field { fields, key, text }, Event::Text(t)) => {
                let chunk = t.unescape().map_err(parse_error)?;
                State::Field {
                    fields,
                    key,
                    text: text + &chunk,
                }
            },
            (State::Field { fields, key, text }, Event::CData(c)) => {
                let chunk = String::from_utf8_lossy(&c).into_owned();
                State::Field {
                    fields,
                    key,
                    text: text + &chunk,
                }
            },
            (State::Field { mut fields, key, text }, Event::End(_)) => {
                let value = field_value(&key, &text);
                fields.insert(key, value);
                State::Url(fields)
            },
            (State::Field { fields, key, .. }, Event::Start(_)) => {
                warn!(field = %key, "Skipping nested markup in sitemap extension");
                decoded.skipped.push(ValidationError::new(
                    key.as_str(),
                    "",
                    "nested extension elements are not preserved",
                ));
                State::Skip {
                    depth: 2,
                    resume: Box::new(State::Url(fields)),
                }
            },
            (State::Field { fields, key, .. }, Event::Empty(_)) => {
                warn!(field = %key, "Skipping nested markup in sitemap extension");
                decoded.skipped.push(ValidationError::new(
                    key.as_str(),
                    "",
                    "nested extension elements are not preserved",
                ));
                State::Skip {
                    depth: 1,
                    resume: Box::new(State::Url(fields)),
                }
            },

            (State::Skip { depth, resume }, Event::Start(_)) => State::Skip {
                depth: depth + 1,
                resume,
            },
            (State::Skip { depth, resume }, Event::End(_)) => {
                if depth == 1 {
                    *resume
                } else {
                    State::Skip {
                        depth: depth - 1,
                        resume,
                    }
                }
            },

            (State::Done, Event::Start(_) | Event::Empty(_)) => {
                return Err(Error::Parse("content after the root element".to_string()));
            },
            (State::Done, Event::Text(t)) if !is_blank(&t) => {
                return Err(Error::Parse("content after the root element".to_string()));
            },

            (State::Done, Event::Eof) => break,
            (State::Prolog, Event::Eof) => {
                return Err(Error::Parse("document has no root element".to_string()));
            },
            (_, Event::Eof) => {
                return Err(Error::Parse("unexpected end of document".to_string()));
            },

            // Declarations, comments, processing instructions and stray
            // whitespace carry no sitemap data.
            (state, _) => state,
        };
    }

    debug!(urls = decoded.urls.len(), "Decoded urlset");
    Ok(decoded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    const NS: &str = "http://www.google.com/schemas/sitemap/0.84";

    fn sample() -> Vec<Fields> {
        vec![
            Fields::from([
                ("loc", "http://example.com/"),
                ("lastmod", "2005-06-03"),
                ("changefreq", "daily"),
                ("priority", "1.0"),
            ]),
            Fields::from([("loc", "http://example.com/a?x=1&y=<2>")]),
        ]
    }

    #[test]
    fn test_pretty_output_shape() {
        let xml = encode(NS, &[], &sample(), EncodeOptions::default()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{NS}">"#)));
        assert!(xml.contains("<loc>http://example.com/</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("&amp;y=&lt;2&gt;"));
        assert!(xml.trim_end().ends_with("</urlset>"));

        // Canonical field order within the first url
        let loc = xml.find("<loc>").unwrap();
        let lastmod = xml.find("<lastmod>").unwrap();
        let changefreq = xml.find("<changefreq>").unwrap();
        let priority = xml.find("<priority>").unwrap();
        assert!(loc < lastmod && lastmod < changefreq && changefreq < priority);
    }

    #[test]
    fn test_compact_output_uses_attributes() {
        let options = EncodeOptions {
            pretty: false,
            indent: 0,
        };
        let xml = encode(NS, &[], &sample(), options).unwrap();

        assert!(!xml.contains('\n'));
        assert!(xml.contains(r#"<url loc="http://example.com/" lastmod="2005-06-03""#));
        assert!(!xml.contains("<loc>"));
    }

    #[test]
    fn test_empty_values_are_not_rendered() {
        let urls = vec![Fields::from([("loc", "http://example.com/"), ("lastmod", "")])];
        let xml = encode(NS, &[], &urls, EncodeOptions::default()).unwrap();
        assert!(!xml.contains("lastmod"));
    }

    #[test]
    fn test_zero_urls_is_well_formed() {
        let xml = encode(NS, &[], &[], EncodeOptions::default()).unwrap();
        let decoded = decode(&xml).unwrap();
        assert!(decoded.urls.is_empty());
        assert_eq!(decoded.namespace.as_deref(), Some(NS));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_decode_both_shapes_agree() {
        let pretty = encode(NS, &[], &sample(), EncodeOptions::default()).unwrap();
        let compact = encode(
            NS,
            &[],
            &sample(),
            EncodeOptions {
                pretty: false,
                indent: 0,
            },
        )
        .unwrap();

        let a = decode(&pretty).unwrap();
        let b = decode(&compact).unwrap();
        assert_eq!(a.urls, sample());
        assert_eq!(b.urls, sample());
    }

    #[test]
    fn test_decode_single_url_is_a_list() {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset xmlns="{NS}"><url><loc>http://example.com/</loc></url></urlset>"#
        );
        let decoded = decode(&xml).unwrap();
        assert_eq!(decoded.urls.len(), 1);
    }

    #[test]
    fn test_decode_trims_and_unescapes() {
        let xml = r#"<urlset>
          <url>
            <loc>  https://example.com/page?foo=1&amp;bar=2  </loc>
            <priority>  0.8  </priority>
          </url>
        </urlset>"#;
        let decoded = decode(xml).unwrap();
        assert_eq!(decoded.namespace, None);
        assert_eq!(
            decoded.urls[0].get("loc"),
            Some("https://example.com/page?foo=1&bar=2")
        );
        assert_eq!(decoded.urls[0].get("priority"), Some("0.8"));
    }

    #[test]
    fn test_decode_keeps_extensions_and_skips_nested_ones() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
                             xmlns:mobile="http://www.google.com/schemas/sitemap-mobile/1.0">
          <url>
            <loc>https://example.com/</loc>
            <mobile:mobile/>
            <note>kept</note>
            <image><loc>https://example.com/a.png</loc></image>
          </url>
        </urlset>"#;

        let decoded = decode(xml).unwrap();
        let fields = &decoded.urls[0];
        assert_eq!(fields.get("loc"), Some("https://example.com/"));
        assert_eq!(fields.get("mobile:mobile"), Some(""));
        assert_eq!(fields.get("note"), Some("kept"));
        assert!(!fields.contains_key("image"));
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].field, "image");
    }

    #[test]
    fn test_text_is_trimmed_once_per_element() {
        // Given: Field text split across text and CDATA chunks
        let xml = r#"<urlset><url>
            <loc>
              https://example.com/a</loc>
            <lastmod> 2005-06-<![CDATA[03]]> </lastmod>
            <note> a <![CDATA[b]]> </note>
          </url></urlset>"#;

        // When: Decoding
        let decoded = decode(xml).unwrap();

        // Then: Recognized fields are trimmed as a whole, extensions kept verbatim
        let fields = &decoded.urls[0];
        assert_eq!(fields.get("loc"), Some("https://example.com/a"));
        assert_eq!(fields.get("lastmod"), Some("2005-06-03"));
        assert_eq!(fields.get("note"), Some(" a b "));
    }

    #[test]
    fn test_extension_whitespace_roundtrips() {
        let urls = vec![Fields::from([
            ("loc", "http://example.com/"),
            ("note", "  padded value "),
        ])];

        for pretty in [true, false] {
            let options = EncodeOptions { pretty, indent: 2 };
            let xml = encode(NS, &[], &urls, options).unwrap();
            assert_eq!(decode(&xml).unwrap().urls, urls);
        }
    }

    #[test]
    fn test_prefixed_namespaces_are_carried_through() {
        // Given: A document using a prefixed extension
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
                             xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
          <url><loc>https://e.com/</loc><image:caption>hi</image:caption></url>
        </urlset>"#;

        // When: Decoding and encoding again
        let decoded = decode(xml).unwrap();
        let out = encode(
            decoded.namespace.as_deref().unwrap(),
            &decoded.prefixes,
            &decoded.urls,
            EncodeOptions::default(),
        )
        .unwrap();

        // Then: The prefix stays declared on the root
        assert_eq!(
            decoded.prefixes,
            vec![(
                "image".to_string(),
                "http://www.google.com/schemas/sitemap-image/1.1".to_string()
            )]
        );
        assert!(out.contains(
            r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1""#
        ));
        assert!(out.contains("<image:caption>hi</image:caption>"));
        assert_eq!(decode(&out).unwrap(), decoded);
    }

    #[test]
    fn test_surrounding_whitespace_is_allowed() {
        let xml = "<?xml version=\"1.0\"?>\n<urlset/>\n\n";
        let decoded = decode(xml).unwrap();
        assert!(decoded.urls.is_empty());
        assert!(matches!(decode("<urlset/>trailing"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_decode_rejects_foreign_root() {
        let xml = r#"<sitemapindex><sitemap><loc>https://example.com/s.xml</loc></sitemap></sitemapindex>"#;
        let Err(Error::Parse(msg)) = decode(xml) else {
            panic!("expected parse error");
        };
        assert!(msg.contains("sitemapindex"));
    }

    #[test]
    fn test_decode_rejects_malformed_xml() {
        let xml = r#"<urlset>
          <url>
            <loc>https://example.com/page1
          </url>
        </urlset>"#;
        assert!(matches!(decode(xml), Err(Error::Parse(_))));
        assert!(matches!(decode(""), Err(Error::Parse(_))));
        assert!(matches!(decode("  <!-- nothing -->  "), Err(Error::Parse(_))));
        assert!(matches!(decode("<urlset><url>"), Err(Error::Parse(_))));
    }
}
