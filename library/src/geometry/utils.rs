use crate::geometry::alias::Point;

#[must_use]
pub(crate) fn debug_format_human_readable_point(point: Point) -> String {
    const MAX_CHARS_TO_OUTPUT: usize = 6;
    let format_coord = |coord: f32| -> String {
        let s = format!("{:.3}", coord);
        if s.len() <= MAX_CHARS_TO_OUTPUT {
            s
        } else {
            s.chars().take(MAX_CHARS_TO_OUTPUT).collect()
        }
    };
    format!("{},{},{}", format_coord(point.x), format_coord(point.y), format_coord(point.z))
}
