// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed initial dock layout: six named panels bound to five regions of the
//! work area, built once on the first frame.
//!
//! ```text
//! +--------+-----------------+----------+
//! |        | Viewport Toolbar|          |
//! | Scene  +-----------------+ Inspector|
//! | Hier-  |    Viewport     |          |
//! | archy  |                 +----------+
//! |        +-----------------+Properties|
//! |        |     Console     |          |
//! +--------+-----------------+----------+
//! ```

use egui::Vec2;
use egui_tiles::{Linear, LinearDir, TileId, Tiles, Tree};
use std::collections::BTreeMap;

pub const SIDEBAR_WIDTH: f32 = 500.0;
pub const CONSOLE_HEIGHT: f32 = 500.0;
pub const TOOLBAR_HEIGHT: f32 = 40.0;
/// Inspector's share of the right column; Properties gets the rest.
pub const INSPECTOR_FRACTION: f32 = 0.6;
/// Smallest extent the flexible center region keeps along either axis.
pub const MIN_CENTER: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelId {
    SceneHierarchy,
    Console,
    Inspector,
    Properties,
    ViewportToolbar,
    Viewport,
}

impl PanelId {
    pub const ALL: [PanelId; 6] = [
        PanelId::SceneHierarchy,
        PanelId::Console,
        PanelId::Inspector,
        PanelId::Properties,
        PanelId::ViewportToolbar,
        PanelId::Viewport,
    ];

    /// Panels listed in the "Windows" menu, in menu order.
    pub const TOGGLEABLE: [PanelId; 5] = [
        PanelId::SceneHierarchy,
        PanelId::Console,
        PanelId::Inspector,
        PanelId::Properties,
        PanelId::Viewport,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PanelId::SceneHierarchy => "Scene Hierarchy",
            PanelId::Console => "Console",
            PanelId::Inspector => "Inspector",
            PanelId::Properties => "Properties",
            PanelId::ViewportToolbar => "Viewport Toolbar",
            PanelId::Viewport => "Viewport",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.title() == title)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DockRegion {
    Left,
    RightTop,
    RightBottom,
    Bottom,
    Toolbar,
    Center,
}

impl DockRegion {
    /// The toolbar strip is too thin for a tab bar.
    pub fn has_tab_bar(self) -> bool {
        !matches!(self, DockRegion::Toolbar)
    }
}

/// Panel title -> region.
pub const BINDINGS: [(&str, DockRegion); 6] = [
    ("Scene Hierarchy", DockRegion::Left),
    ("Console", DockRegion::Bottom),
    ("Inspector", DockRegion::RightTop),
    ("Properties", DockRegion::RightBottom),
    ("Viewport Toolbar", DockRegion::Toolbar),
    ("Viewport", DockRegion::Center),
];

/// Region extents in GUI points for one work-area size. Widths sum to the
/// work width; the center column and the right column each sum to the work
/// height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockPlan {
    pub left: f32,
    pub center: f32,
    pub right: f32,
    pub toolbar: f32,
    pub viewport: f32,
    pub bottom: f32,
    pub right_top: f32,
    pub right_bottom: f32,
}

impl DockPlan {
    pub fn for_work_size(size: Vec2) -> Self {
        let w = size.x.max(1.0);
        let h = size.y.max(1.0);

        let [left, right] = fit([SIDEBAR_WIDTH, SIDEBAR_WIDTH], w);
        let [bottom, toolbar] = fit([CONSOLE_HEIGHT, TOOLBAR_HEIGHT], h);
        let right_top = h * INSPECTOR_FRACTION;

        Self {
            left,
            center: w - left - right,
            right,
            toolbar,
            viewport: h - bottom - toolbar,
            bottom,
            right_top,
            right_bottom: h - right_top,
        }
    }
}

/// Fixed extents are kept exactly while the center still gets
/// `MIN_CENTER`; otherwise all of them shrink in proportion, leaving the
/// center the same share it has at the threshold.
fn fit<const N: usize>(wants: [f32; N], available: f32) -> [f32; N] {
    let needed = wants.iter().sum::<f32>() + MIN_CENTER;
    if needed <= available {
        wants
    } else {
        wants.map(|want| want * available / needed)
    }
}

pub struct DockTree {
    pub tree: Tree<PanelId>,
    /// Outermost tile per panel: the tab container, or the bare pane for
    /// regions without a tab bar. Visibility toggles act on these.
    handles: BTreeMap<PanelId, TileId>,
    plan: DockPlan,
}

impl DockTree {
    pub fn build(plan: DockPlan) -> Self {
        let mut tiles = Tiles::default();
        let mut handles = BTreeMap::new();
        let mut by_region = BTreeMap::new();

        for (title, region) in BINDINGS {
            let Some(panel) = PanelId::from_title(title) else {
                tracing::warn!(title, "dock binding names an unknown panel");
                continue;
            };
            let pane = tiles.insert_pane(panel);
            let tile = if region.has_tab_bar() {
                tiles.insert_tab_tile(vec![pane])
            } else {
                pane
            };
            handles.insert(panel, tile);
            by_region.insert(region, tile);
        }

        let sized = |regions: &[(DockRegion, f32)]| -> Vec<(TileId, f32)> {
            regions
                .iter()
                .filter_map(|(r, share)| by_region.get(r).map(|t| (*t, *share)))
                .collect()
        };
        let center_children = sized(&[
            (DockRegion::Toolbar, plan.toolbar),
            (DockRegion::Center, plan.viewport),
            (DockRegion::Bottom, plan.bottom),
        ]);
        let right_children = sized(&[
            (DockRegion::RightTop, plan.right_top),
            (DockRegion::RightBottom, plan.right_bottom),
        ]);
        let left_children = sized(&[(DockRegion::Left, plan.left)]);

        let center = insert_linear(&mut tiles, LinearDir::Vertical, &center_children);
        let right = insert_linear(&mut tiles, LinearDir::Vertical, &right_children);
        let mut root_children = left_children;
        root_children.push((center, plan.center));
        root_children.push((right, plan.right));
        let root = insert_linear(&mut tiles, LinearDir::Horizontal, &root_children);

        Self {
            tree: Tree::new("aeroslr_dock", root, tiles),
            handles,
            plan,
        }
    }

    pub fn plan(&self) -> &DockPlan {
        &self.plan
    }

    pub fn handle(&self, panel: PanelId) -> Option<TileId> {
        self.handles.get(&panel).copied()
    }

    /// Push per-panel visibility into the tile tree.
    pub fn sync_visibility(&mut self, visible: impl Fn(PanelId) -> bool) {
        for (panel, tile) in &self.handles {
            self.tree.tiles.set_visible(*tile, visible(*panel));
        }
    }
}

fn insert_linear(tiles: &mut Tiles<PanelId>, dir: LinearDir, children: &[(TileId, f32)]) -> TileId {
    let mut linear = Linear::new(dir, children.iter().map(|(id, _)| *id).collect());
    for (id, share) in children {
        linear.shares.set_share(*id, *share);
    }
    tiles.insert_container(linear)
}

/// One-shot latch around the dock tree.
pub enum LayoutState {
    Pending,
    Built(Box<DockTree>),
}

impl LayoutState {
    /// Build the tree from `work` the first time; later calls ignore `work`
    /// and return the existing (possibly user-rearranged) tree.
    pub fn ensure_built(&mut self, work: Vec2) -> Option<&mut DockTree> {
        if matches!(self, LayoutState::Pending) {
            let plan = DockPlan::for_work_size(work);
            tracing::debug!(?plan, "building dock layout");
            *self = LayoutState::Built(Box::new(DockTree::build(plan)));
        }
        match self {
            LayoutState::Built(tree) => Some(&mut **tree),
            LayoutState::Pending => None,
        }
    }

    pub fn built(&self) -> Option<&DockTree> {
        match self {
            LayoutState::Built(tree) => Some(&**tree),
            LayoutState::Pending => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use egui_tiles::{Container, Tile};
    use std::collections::BTreeSet;

    #[test]
    fn full_hd_plan_uses_fixed_offsets() {
        let p = DockPlan::for_work_size(egui::vec2(1920.0, 1050.0));
        assert_relative_eq!(p.left, 500.0);
        assert_relative_eq!(p.right, 500.0);
        assert_relative_eq!(p.center, 920.0);
        assert_relative_eq!(p.bottom, 500.0);
        assert_relative_eq!(p.toolbar, 40.0);
        assert_relative_eq!(p.viewport, 510.0);
        assert_relative_eq!(p.right_top, 630.0);
        assert_relative_eq!(p.right_bottom, 420.0);
    }

    #[test]
    fn laptop_plans_keep_fixed_offsets_while_they_fit() {
        let p = DockPlan::for_work_size(egui::vec2(1366.0, 738.0));
        assert_relative_eq!(p.left, 500.0);
        assert_relative_eq!(p.right, 500.0);
        assert_relative_eq!(p.center, 366.0);
        assert_relative_eq!(p.bottom, 500.0);
        assert_relative_eq!(p.toolbar, 40.0);
        assert_relative_eq!(p.viewport, 198.0, epsilon = 1e-3);

        let p = DockPlan::for_work_size(egui::vec2(1600.0, 870.0));
        assert_relative_eq!(p.right, 500.0);
        assert_relative_eq!(p.bottom, 500.0);
    }

    #[test]
    fn fixed_offsets_shrink_only_when_the_center_would_vanish() {
        let exact = DockPlan::for_work_size(egui::vec2(1001.0, 541.0));
        assert_relative_eq!(exact.left, 500.0);
        assert_relative_eq!(exact.center, MIN_CENTER);
        assert_relative_eq!(exact.bottom, 500.0);
        assert_relative_eq!(exact.viewport, MIN_CENTER, epsilon = 1e-3);

        let narrow = DockPlan::for_work_size(egui::vec2(800.0, 400.0));
        assert!(narrow.left < SIDEBAR_WIDTH);
        assert_relative_eq!(narrow.left, narrow.right);
        assert!(narrow.center > 0.0);
        assert!(narrow.bottom < CONSOLE_HEIGHT);
        assert_relative_eq!(
            narrow.bottom / narrow.toolbar,
            CONSOLE_HEIGHT / TOOLBAR_HEIGHT,
            epsilon = 1e-3
        );
    }

    #[test]
    fn large_work_area_keeps_every_fixed_extent() {
        let p = DockPlan::for_work_size(egui::vec2(3840.0, 2100.0));
        assert_relative_eq!(p.left, SIDEBAR_WIDTH);
        assert_relative_eq!(p.right, SIDEBAR_WIDTH);
        assert_relative_eq!(p.bottom, CONSOLE_HEIGHT);
        assert_relative_eq!(p.toolbar, TOOLBAR_HEIGHT);
    }

    #[test]
    fn plans_partition_the_work_area() {
        for (w, h) in [(1920.0, 1080.0), (800.0, 600.0), (300.0, 200.0), (0.0, -5.0)] {
            let p = DockPlan::for_work_size(egui::vec2(w, h));
            let (w, h) = (f32::max(w, 1.0), f32::max(h, 1.0));
            assert_relative_eq!(p.left + p.center + p.right, w, epsilon = 1e-3);
            assert_relative_eq!(p.toolbar + p.viewport + p.bottom, h, epsilon = 1e-3);
            assert_relative_eq!(p.right_top + p.right_bottom, h, epsilon = 1e-3);
            for extent in [p.left, p.center, p.right, p.toolbar, p.viewport, p.bottom] {
                assert!(extent > 0.0, "{p:?}");
            }
        }
    }

    #[test]
    fn every_panel_is_bound_exactly_once() {
        let titles: BTreeSet<_> = BINDINGS.iter().map(|(t, _)| *t).collect();
        let regions: BTreeSet<_> = BINDINGS.iter().map(|(_, r)| *r).collect();
        assert_eq!(titles.len(), PanelId::ALL.len());
        assert_eq!(regions.len(), BINDINGS.len());
        for panel in PanelId::ALL {
            assert!(titles.contains(panel.title()));
            assert_eq!(PanelId::from_title(panel.title()), Some(panel));
        }
        assert_eq!(PanelId::from_title("Timeline"), None);
    }

    #[test]
    fn toolbar_pane_has_no_tab_container() {
        let dock = DockTree::build(DockPlan::for_work_size(egui::vec2(1920.0, 1080.0)));
        for panel in PanelId::ALL {
            let tile = dock.handle(panel).unwrap();
            let is_tabs = matches!(
                dock.tree.tiles.get(tile),
                Some(Tile::Container(Container::Tabs(_)))
            );
            let is_pane = matches!(dock.tree.tiles.get(tile), Some(Tile::Pane(p)) if *p == panel);
            if panel == PanelId::ViewportToolbar {
                assert!(is_pane);
            } else {
                assert!(is_tabs, "{panel:?} should sit in a tab container");
            }
        }
    }

    #[test]
    fn root_is_left_center_right() {
        let dock = DockTree::build(DockPlan::for_work_size(egui::vec2(1920.0, 1080.0)));
        let root = dock.tree.root().unwrap();
        let Some(Tile::Container(Container::Linear(linear))) = dock.tree.tiles.get(root) else {
            panic!("root should be a linear container");
        };
        assert_eq!(linear.dir, LinearDir::Horizontal);
        assert_eq!(linear.children.len(), 3);
        assert_eq!(linear.children[0], dock.handle(PanelId::SceneHierarchy).unwrap());
    }

    #[test]
    fn layout_is_built_once() {
        let mut state = LayoutState::Pending;
        assert!(state.built().is_none());
        let first = *state
            .ensure_built(egui::vec2(1920.0, 1080.0))
            .unwrap()
            .plan();
        let second = *state.ensure_built(egui::vec2(800.0, 600.0)).unwrap().plan();
        assert_eq!(first, second);
    }

    #[test]
    fn hidden_panels_are_hidden_in_the_tree() {
        let mut dock = DockTree::build(DockPlan::for_work_size(egui::vec2(1920.0, 1080.0)));
        dock.sync_visibility(|p| p != PanelId::Console);
        let console = dock.handle(PanelId::Console).unwrap();
        let viewport = dock.handle(PanelId::Viewport).unwrap();
        assert!(!dock.tree.tiles.is_visible(console));
        assert!(dock.tree.tiles.is_visible(viewport));
    }
}
