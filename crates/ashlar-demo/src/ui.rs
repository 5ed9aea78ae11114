//! The example scene: sidebar with profile card and blobs, a scrolling main
//! panel with a floating scrollbar, and a translucent floating panel pinned
//! to the last blob.
//!
//! This module plays the role of the layout engine: it computes element
//! rectangles with plain arithmetic and emits one fresh `CommandList` per
//! frame, in back-to-front paint order with balanced clip markers. All
//! interactive state (scroll offset, drag, pointer) arrives as explicit input
//! — nothing here is global.

use ashlar_engine::coords::{BorderWidths, CornerRadius, Rect, Vec2, Viewport};
use ashlar_engine::paint::Color;
use ashlar_engine::scene::CommandList;
use ashlar_engine::text::{FontId, FontSystem};
use ashlar_engine::textures::TextureId;

const PADDING: f32 = 16.0;
const GAP: f32 = 16.0;
const SIDEBAR_WIDTH: f32 = 300.0;
const SCROLLBAR_WIDTH: f32 = 12.0;
const CONTENT_ROWS: usize = 40;
const ROW_HEIGHT: f32 = 34.0;

const OUTER_BG: Color = Color::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0);
const SIDEBAR_BG: Color = Color::new(150.0 / 255.0, 150.0 / 255.0, 1.0, 1.0);
const PROFILE_BG: Color = Color::new(130.0 / 255.0, 130.0 / 255.0, 1.0, 1.0);
const BLOB_BG: Color = Color::new(110.0 / 255.0, 110.0 / 255.0, 1.0, 1.0);
const PANEL_BG: Color = Color::new(180.0 / 255.0, 180.0 / 255.0, 220.0 / 255.0, 1.0);
const PANEL_BORDER: Color = Color::new(0.0, 0.0, 180.0 / 255.0, 1.0);
const FLOATING_BG: Color = Color::new(140.0 / 255.0, 80.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
const TEXT_DARK: Color = Color::BLACK;
const TEXT_LIGHT: Color = Color::WHITE;

/// Per-frame interactive input to the scene builder.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Pixels the main content is scrolled down.
    pub scroll_offset: f32,
    /// Pointer position in logical pixels.
    pub pointer: Vec2,
    /// Active scrollbar drag, if any.
    pub scrollbar_drag: Option<ScrollDrag>,
}

/// Scrollbar drag anchor: where the thumb was grabbed and what the scroll
/// offset was at that moment.
#[derive(Debug, Copy, Clone)]
pub struct ScrollDrag {
    pub grab_y: f32,
    pub scroll_origin: f32,
}

/// One frame's scene plus the geometry the input layer needs next frame.
pub struct Scene {
    pub commands: CommandList,
    /// Scrollbar thumb rectangle (hit target for dragging).
    pub scrollbar_thumb: Rect,
    /// Upper bound for `scroll_offset` at the current viewport size.
    pub max_scroll: f32,
    /// Pixels of scroll per pixel of thumb travel.
    pub drag_ratio: f32,
}

/// Builds the frame's command list for the given viewport and input state.
pub fn build_scene(
    viewport: Viewport,
    state: &UiState,
    fonts: &FontSystem,
    font: FontId,
    profile_picture: TextureId,
) -> Scene {
    let mut list = CommandList::new();
    let (vw, vh) = (viewport.width.max(360.0), viewport.height.max(240.0));

    // ── outer container ───────────────────────────────────────────────────
    list.push_rectangle(Rect::new(0.0, 0.0, vw, vh), OUTER_BG, CornerRadius::zero());

    // ── sidebar ───────────────────────────────────────────────────────────
    let sidebar = Rect::new(PADDING, PADDING, SIDEBAR_WIDTH, vh - 2.0 * PADDING);
    list.push_rectangle(sidebar, SIDEBAR_BG, CornerRadius::zero());

    let inner_x = sidebar.origin.x + PADDING;
    let inner_w = sidebar.size.x - 2.0 * PADDING;

    // Profile card: picture + name, rounded.
    let profile = Rect::new(inner_x, sidebar.origin.y + PADDING, inner_w, 76.0);
    list.push_rectangle(profile, PROFILE_BG, CornerRadius::all(8.0));

    let picture = Rect::new(profile.origin.x + 8.0, profile.origin.y + 8.0, 60.0, 60.0);
    list.push_image(picture, profile_picture);

    let name = "Profile Page";
    let name_size = fonts.measure_text(name, font, 24.0, None);
    let name_origin = Vec2::new(
        picture.origin.x + picture.size.x + 8.0,
        picture.origin.y + (picture.size.y - name_size.y) / 2.0,
    );
    list.push_text(
        Rect::from_origin_size(name_origin, name_size),
        font,
        24.0,
        TEXT_DARK,
        name,
    );

    // Four blobs below the card.
    let mut blob4 = Rect::default();
    for i in 0..4 {
        let blob = Rect::new(
            inner_x,
            profile.origin.y + profile.size.y + GAP + i as f32 * (50.0 + GAP),
            inner_w,
            50.0,
        );
        list.push_rectangle(blob, BLOB_BG, CornerRadius::all(8.0));
        blob4 = blob;
    }

    // ── main panel with scrolling content ─────────────────────────────────
    let panel = Rect::new(
        sidebar.origin.x + sidebar.size.x + GAP,
        PADDING,
        (vw - SIDEBAR_WIDTH - 2.0 * PADDING - 2.0 * GAP).max(120.0),
        vh - 2.0 * PADDING,
    );
    list.push_rectangle(panel, PANEL_BG, CornerRadius::zero());

    let content_height = CONTENT_ROWS as f32 * ROW_HEIGHT + 2.0 * PADDING;
    let max_scroll = (content_height - panel.size.y).max(0.0);
    let scroll = state.scroll_offset.clamp(0.0, max_scroll);

    list.push_clip_start(panel);
    for i in 0..CONTENT_ROWS {
        let row_y = panel.origin.y + PADDING + i as f32 * ROW_HEIGHT - scroll;
        // Skip rows fully outside the panel; the clip would eat them anyway.
        if row_y + ROW_HEIGHT < panel.origin.y || row_y > panel.origin.y + panel.size.y {
            continue;
        }
        list.push_text(
            Rect::new(panel.origin.x + PADDING, row_y + 4.0, panel.size.x - 2.0 * PADDING, 24.0),
            font,
            24.0,
            TEXT_DARK,
            format!("I'm row {} in a scroll container.", i + 1),
        );
    }
    list.push_clip_end();

    // Panel outline; sides differ so the corners taper.
    list.push_border(
        panel,
        CornerRadius::all(5.0),
        BorderWidths::new(4.0, 2.0, 4.0, 2.0),
        PANEL_BORDER,
    );

    // ── floating scrollbar ────────────────────────────────────────────────
    let visible_fraction = (panel.size.y / content_height).min(1.0);
    let thumb_height = (visible_fraction * panel.size.y).max(24.0);
    let track = panel.size.y - thumb_height;
    let thumb_y = if max_scroll > 0.0 {
        panel.origin.y + scroll / max_scroll * track
    } else {
        panel.origin.y
    };
    let thumb = Rect::new(
        panel.origin.x + panel.size.x - SCROLLBAR_WIDTH,
        thumb_y,
        SCROLLBAR_WIDTH,
        thumb_height,
    );

    let active = state.scrollbar_drag.is_some() || thumb.contains(state.pointer);
    let thumb_color = if active {
        Color::from_srgb_u8(100, 100, 140, 150)
    } else {
        Color::from_srgb_u8(120, 120, 160, 150)
    };
    list.push_rectangle(thumb, thumb_color, CornerRadius::all(6.0));

    // ── floating panel pinned to the fourth blob ──────────────────────────
    let floating = Rect::new(
        blob4.origin.x + blob4.size.x - 50.0,
        blob4.origin.y + 25.0,
        300.0,
        200.0,
    );
    list.push_rectangle(floating, FLOATING_BG, CornerRadius::all(8.0));
    list.push_clip_start(floating);
    for i in 0..6 {
        list.push_text(
            Rect::new(
                floating.origin.x + 8.0,
                floating.origin.y + 8.0 + i as f32 * ROW_HEIGHT,
                floating.size.x - 16.0,
                24.0,
            ),
            font,
            24.0,
            TEXT_LIGHT,
            "I'm a text field in a scroll container.",
        );
    }
    list.push_clip_end();

    Scene {
        commands: list,
        scrollbar_thumb: thumb,
        max_scroll,
        drag_ratio: if track > 0.0 { max_scroll / track } else { 0.0 },
    }
}
