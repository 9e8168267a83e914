//! Per-row contextual menu with global dismiss.
//!
//! At most one row menu is open. The presentation layer registers the screen regions
//! of each row's menu trigger and of the open menu; any pointer interaction outside
//! every registered region closes the open menu.

/// Pointer position in presentation coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; the right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The button that opens a row's menu.
    MenuTrigger,
    /// The open menu itself.
    ContextMenu,
}

#[derive(Debug, Clone, PartialEq)]
struct Region {
    kind: RegionKind,
    row_id: String,
    rect: Rect,
}

/// Which row menu is open, plus the regions that do not dismiss it.
#[derive(Debug, Clone, Default)]
pub struct RowMenu {
    open: Option<String>,
    regions: Vec<Region>,
}

impl RowMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open_for(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    /// Open the menu for `id`, or close it if it is already open for `id`.
    pub fn toggle(&mut self, id: &str) {
        if self.is_open_for(id) {
            self.open = None;
        } else {
            self.open = Some(id.to_string());
        }
        tracing::debug!(open = ?self.open, "row menu toggled");
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Register (or move) the region of `kind` for row `row_id`.
    pub fn register_region(&mut self, kind: RegionKind, row_id: &str, rect: Rect) {
        match self
            .regions
            .iter_mut()
            .find(|r| r.kind == kind && r.row_id == row_id)
        {
            Some(region) => region.rect = rect,
            None => self.regions.push(Region {
                kind,
                row_id: row_id.to_string(),
                rect,
            }),
        }
    }

    /// Forget every region of row `row_id` (e.g. when the row leaves the page).
    pub fn unregister_row(&mut self, row_id: &str) {
        self.regions.retain(|r| r.row_id != row_id);
    }

    /// Region kind under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<RegionKind> {
        self.regions
            .iter()
            .find(|r| r.rect.contains(point))
            .map(|r| r.kind)
    }

    /// Global pointer handler: closes the open menu when `point` misses every region.
    ///
    /// Returns whether a menu was closed.
    pub fn on_pointer_down(&mut self, point: Point) -> bool {
        self.dismiss_unless(self.hit_test(point))
    }

    /// Same as [`on_pointer_down`](Self::on_pointer_down) for callers that already know
    /// what was hit (`None` means "outside every trigger and menu").
    pub fn dismiss_unless(&mut self, target: Option<RegionKind>) -> bool {
        if target.is_some() || self.open.is_none() {
            return false;
        }
        self.open = None;
        tracing::debug!("row menu dismissed by outside interaction");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_switches_and_closes() {
        let mut menu = RowMenu::new();
        menu.toggle("a");
        assert_eq!(menu.open_id(), Some("a"));
        menu.toggle("b");
        assert_eq!(menu.open_id(), Some("b"));
        menu.toggle("b");
        assert_eq!(menu.open_id(), None);
    }

    #[test]
    fn click_outside_regions_dismisses() {
        let mut menu = RowMenu::new();
        menu.register_region(RegionKind::MenuTrigger, "a", Rect::new(100.0, 0.0, 20.0, 20.0));
        menu.register_region(RegionKind::ContextMenu, "a", Rect::new(60.0, 20.0, 80.0, 60.0));
        menu.toggle("a");

        assert!(!menu.on_pointer_down(Point::new(110.0, 10.0)));
        assert!(!menu.on_pointer_down(Point::new(70.0, 50.0)));
        assert_eq!(menu.open_id(), Some("a"));

        assert!(menu.on_pointer_down(Point::new(5.0, 5.0)));
        assert_eq!(menu.open_id(), None);
        // Nothing left to dismiss.
        assert!(!menu.on_pointer_down(Point::new(5.0, 5.0)));
    }

    #[test]
    fn rect_edges_are_half_open() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
        assert!(!rect.contains(Point::new(5.0, 10.0)));
    }

    #[test]
    fn registering_again_moves_the_region() {
        let mut menu = RowMenu::new();
        menu.register_region(RegionKind::MenuTrigger, "a", Rect::new(0.0, 0.0, 10.0, 10.0));
        menu.register_region(RegionKind::MenuTrigger, "a", Rect::new(50.0, 50.0, 10.0, 10.0));
        assert_eq!(menu.hit_test(Point::new(5.0, 5.0)), None);
        assert_eq!(
            menu.hit_test(Point::new(55.0, 55.0)),
            Some(RegionKind::MenuTrigger)
        );

        menu.unregister_row("a");
        assert_eq!(menu.hit_test(Point::new(55.0, 55.0)), None);
    }

    #[test]
    fn dismiss_by_target() {
        let mut menu = RowMenu::new();
        menu.toggle("a");
        assert!(!menu.dismiss_unless(Some(RegionKind::ContextMenu)));
        assert!(menu.dismiss_unless(None));
    }
}
