use log::info;

use crate::models::listing::Listing;

/// Consumer of a filter pass. The mapping widget implements this; the
/// pipeline only guarantees that nothing unlocated ever reaches the marker
/// path and that both sequences keep store order.
pub trait RenderSink {
    fn render_markers(&mut self, visible: &[Listing]);
    fn render_unlocated(&mut self, unlocated: &[Listing]);
}

/// Sink for headless runs: reports counts instead of drawing.
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn render_markers(&mut self, visible: &[Listing]) {
        info!("{} listings visible on the map", visible.len());
    }

    fn render_unlocated(&mut self, unlocated: &[Listing]) {
        if !unlocated.is_empty() {
            info!("{} listings without usable coordinates", unlocated.len());
        }
    }
}

/// Escaping for sinks that interpolate listing text or urls into markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
