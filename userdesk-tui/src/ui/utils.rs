use ratatui::layout::Rect;
use time::{format_description::well_known::Rfc2822, OffsetDateTime, UtcOffset};

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}

/// Local, human readable form of a server timestamp; "-" when absent.
pub fn format_timestamp(dt: Option<OffsetDateTime>) -> String {
    dt.map(to_local_time)
        .and_then(|local| local.format(&Rfc2822).ok())
        .unwrap_or_else(|| "-".to_string())
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
