use crate::domain::model::{Jaw, JawPositions};

/// Y2 is the geometric top edge, so the vertical axis flips.
pub fn extract_jaw(raw: &JawPositions) -> Jaw {
    Jaw {
        left: raw.x1,
        top: raw.y2,
        right: raw.x2,
        bottom: raw.y1,
    }
}
