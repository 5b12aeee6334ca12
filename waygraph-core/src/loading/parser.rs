//! Streaming parse of the extract XML
//!
//! A single left-to-right pass; `node` and `way` elements are handled as
//! encountered and never revisited, so arbitrarily large extracts stream
//! through without materializing a document. Elements with missing or
//! unparsable required attributes are skipped as data errors; only XML-level
//! failures abort the pass.

use std::io::BufRead;

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::accumulator::BuildSession;
use super::config::GraphConfig;
use crate::error::Error;
use crate::model::Way;
use crate::{NodeId, WayId};

pub(crate) fn parse_extract<R: BufRead>(
    reader: R,
    config: &GraphConfig,
    session: &mut BuildSession,
) -> Result<(), Error> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut saw_root = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(element) => {
                check_root(&element, &mut saw_root)?;
                match element.name().as_ref() {
                    b"node" => handle_node(&element, session)?,
                    b"way" => handle_way(&element, &mut xml, config, session)?,
                    _ => {}
                }
            }
            Event::Empty(element) => {
                check_root(&element, &mut saw_root)?;
                // A self-closing way has no references and nothing to retain
                if element.name().as_ref() == b"node" {
                    handle_node(&element, session)?;
                }
            }
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::InvalidFormat(
            "document contains no elements".into(),
        ));
    }
    Ok(())
}

/// The first element of the document must be the `osm` root.
fn check_root(element: &BytesStart<'_>, saw_root: &mut bool) -> Result<(), Error> {
    if *saw_root {
        return Ok(());
    }
    if element.name().as_ref() != b"osm" {
        return Err(Error::InvalidFormat(format!(
            "expected <osm> root element, found <{}>",
            String::from_utf8_lossy(element.name().as_ref())
        )));
    }
    *saw_root = true;
    Ok(())
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

/// Visible when the attribute is absent or literally `"true"`.
fn is_visible(element: &BytesStart<'_>) -> Result<bool, Error> {
    Ok(attribute(element, b"visible")?.is_none_or(|value| value == "true"))
}

fn handle_node(element: &BytesStart<'_>, session: &mut BuildSession) -> Result<(), Error> {
    if !is_visible(element)? {
        return Ok(());
    }
    let id = attribute(element, b"id")?.and_then(|value| value.parse::<NodeId>().ok());
    let lat = attribute(element, b"lat")?.and_then(|value| value.parse::<f32>().ok());
    let lon = attribute(element, b"lon")?.and_then(|value| value.parse::<f32>().ok());
    match (id, lat, lon) {
        (Some(id), Some(lat), Some(lon)) => session.registry.set_coordinates(id, lat, lon),
        _ => debug!("skipping node element with missing or malformed attributes"),
    }
    Ok(())
}

fn handle_way<R: BufRead>(
    element: &BytesStart<'_>,
    xml: &mut Reader<R>,
    config: &GraphConfig,
    session: &mut BuildSession,
) -> Result<(), Error> {
    let Some(id) = attribute(element, b"id")?.and_then(|value| value.parse::<WayId>().ok())
    else {
        debug!("skipping way element without usable id");
        return Ok(());
    };
    if !is_visible(element)? || session.is_retained(id) {
        return Ok(());
    }

    if let Some(way) = read_way_subtree(id, xml, config)? {
        session.retain_way(way);
    }
    Ok(())
}

/// Reads `nd` and `tag` children until the way closes. Returns `None` as
/// soon as a prohibiting `highway` tag is found; any children left unread
/// fall through to the outer loop, which ignores them.
fn read_way_subtree<R: BufRead>(
    id: WayId,
    xml: &mut Reader<R>,
    config: &GraphConfig,
) -> Result<Option<Way>, Error> {
    let mut way = Way::new(id);
    let mut buf = Vec::new();
    loop {
        match xml.read_event_into(&mut buf)? {
            Event::End(element) if element.name().as_ref() == b"way" => break,
            Event::Eof => break,
            Event::Start(element) | Event::Empty(element) => match element.name().as_ref() {
                b"nd" => {
                    match attribute(&element, b"ref")?.and_then(|value| value.parse::<NodeId>().ok())
                    {
                        Some(node_ref) => way.node_refs.push(node_ref),
                        None => debug!("way {id}: skipping nd without usable ref"),
                    }
                }
                b"tag" => {
                    let key = attribute(&element, b"k")?;
                    let value = attribute(&element, b"v")?.unwrap_or_default();
                    match key.as_deref() {
                        Some("highway") => {
                            if !config.is_motorized(&value) {
                                debug!("way {id}: discarded, highway={value}");
                                return Ok(None);
                            }
                        }
                        Some("oneway") => way.one_way = value == "yes",
                        _ => {}
                    }
                }
                _ => {}
            },
            _ => {}
        }
        buf.clear();
    }
    Ok(Some(way))
}
