//! View constants (layout/sizing).

pub(crate) const TITLE_BAR_H: f32 = 40.0;

pub(crate) const PAGE_PAD: f32 = 20.0;

// text sizing
pub(crate) const HEADING_TEXT: f32 = 24.0;
pub(crate) const SECTION_TEXT: f32 = 18.0;
pub(crate) const ROW_TEXT: f32 = 14.0;
pub(crate) const SMALL_TEXT: f32 = 12.0;
pub(crate) const STAT_TEXT: f32 = 32.0;

// lists
pub(crate) const GROUP_SPACING: f32 = 16.0;
pub(crate) const ROW_SPACING: f32 = 4.0;

pub(crate) const ARTIST_IMAGE: f32 = 48.0;
pub(crate) const REC_CARD_W: f32 = 360.0;

pub(crate) const MODAL_W: f32 = 520.0;
pub(crate) const WELCOME_W: f32 = 560.0;
