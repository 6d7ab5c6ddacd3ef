//! The showcase page
//!
//! `Showcase` owns the layout, the animation scheduler and every element on
//! the page. The host drives it with frame ticks, scroll positions and
//! pointer events, and reads the result back as a [`FrameSnapshot`].

use kinetic_animation::{AnimationScheduler, Property, RangeTransform, Value};
use kinetic_core::{Color, PointerEvent, PointerKind, Rect, Size};
use kinetic_layout::{
    AnimationControls, DragController, GestureRecognizer, GestureState, InViewChange,
    InViewObserver, MotionElement, MotionGroup, PageLayout, PageNode, ScrollOffset, ScrollRange,
    ScrollTracker,
};
use kinetic_svg::IconPath;

use crate::config::ShowcaseConfig;
use crate::elements;
use crate::error::{Result, ShowcaseError};
use crate::snapshot::{
    CellContent, CellSnapshot, FrameSnapshot, HeadingSnapshot, ParagraphSnapshot, ScrollSnapshot,
};

const VISIBLE: &str = "visible";

/// A mounted showcase page
#[derive(Debug)]
pub struct Showcase {
    config: ShowcaseConfig,
    layout: PageLayout,
    scheduler: AnimationScheduler,
    tracker: ScrollTracker,
    section: Rect,
    section_range: ScrollRange,

    grid: MotionGroup,
    fade_square: MotionElement,
    fade_circle: MotionElement,
    shape: MotionElement,
    button: MotionElement,
    button_gesture: GestureRecognizer,
    drag: DragController,
    /// The pointer pressed on the drag handle and has not been released
    drag_captured: bool,
    progress_fill: MotionElement,
    icon: MotionElement,
    icon_path: IconPath,

    heading: MotionElement,
    heading_controls: AnimationControls,
    section_observer: InViewObserver,
    paragraphs: Vec<(MotionElement, RangeTransform)>,
}

impl Showcase {
    /// Lay the page out and start every entrance animation
    pub fn mount(config: ShowcaseConfig) -> Result<Self> {
        config.validate()?;
        let viewport = config.viewport_size();
        let layout = PageLayout::compute(&config.layout, viewport)?;
        let section = node_rect(&layout, PageNode::ScrollSection)?;
        let button_rect = node_rect(&layout, PageNode::Button)?;

        let heading_controls = AnimationControls::new();
        let [left, right] = elements::paragraph_slides()?;
        let paragraphs = [left, right]
            .into_iter()
            .enumerate()
            .map(|(index, slide)| (elements::paragraph(index, &slide), slide))
            .collect();

        let mut showcase = Self {
            tracker: ScrollTracker::new(layout.document_height(), viewport),
            section,
            section_range: section_range(section, viewport.height),
            scheduler: AnimationScheduler::new(),

            grid: elements::grid(),
            fade_square: elements::fade_square(),
            fade_circle: elements::fade_circle(),
            shape: elements::shape(),
            button: elements::button(),
            button_gesture: GestureRecognizer::new(button_rect),
            drag: DragController::new(elements::drag_config(&config.drag)),
            drag_captured: false,
            progress_fill: elements::progress_fill(),
            icon: elements::icon(),
            icon_path: IconPath::parse(elements::ICON_PATH, elements::ICON_VIEW_BOX)?,

            heading: elements::heading(&heading_controls),
            heading_controls,
            section_observer: InViewObserver::new(config.reveal.into()),
            paragraphs,

            layout,
            config,
        };

        let scheduler = &mut showcase.scheduler;
        showcase.grid.mount(scheduler)?;
        for element in [
            &mut showcase.fade_square,
            &mut showcase.fade_circle,
            &mut showcase.shape,
            &mut showcase.button,
            &mut showcase.progress_fill,
            &mut showcase.icon,
            &mut showcase.heading,
        ] {
            element.mount(scheduler)?;
        }
        for (paragraph, _) in &mut showcase.paragraphs {
            paragraph.mount(scheduler)?;
        }
        showcase.sync_scroll()?;

        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            document_height = showcase.layout.document_height(),
            values = showcase.scheduler.len(),
            "showcase mounted"
        );
        Ok(showcase)
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Time since mount
    pub fn elapsed_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    pub fn scroll_y(&self) -> f32 {
        self.tracker.scroll_y()
    }

    pub fn max_scroll(&self) -> f32 {
        self.tracker.max_scroll()
    }

    /// Scroll positions over which the paragraphs slide in
    pub fn section_range(&self) -> ScrollRange {
        self.section_range
    }

    /// The heading reveal has been started
    pub fn heading_visible(&self) -> bool {
        self.heading.current_label() == Some(VISIBLE)
    }

    pub fn button_state(&self) -> GestureState {
        self.button_gesture.state()
    }

    /// Completed presses on the button
    pub fn button_taps(&self) -> u32 {
        self.button_gesture.taps()
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// Advance by one frame; returns true while anything is still moving
    pub fn tick(&mut self, dt_ms: f32) -> Result<bool> {
        let dragging = self.drag.tick(dt_ms);
        let animating = self.scheduler.tick(dt_ms);
        self.heading.poll_controls(&mut self.scheduler)?;
        Ok(dragging || animating)
    }

    /// Scroll to `y`, clamped to the page; returns the position reached
    pub fn scroll_to(&mut self, y: f32) -> Result<f32> {
        let reached = self.tracker.scroll_to(y);
        self.sync_scroll()?;
        Ok(reached)
    }

    pub fn scroll_by(&mut self, dy: f32) -> Result<f32> {
        let reached = self.tracker.scroll_by(dy);
        self.sync_scroll()?;
        Ok(reached)
    }

    /// Relayout for a new viewport, keeping the scroll position in range
    pub fn resize(&mut self, viewport: Size) -> Result<()> {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return Err(ShowcaseError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let layout = PageLayout::compute(&self.config.layout, viewport)?;
        self.section = node_rect(&layout, PageNode::ScrollSection)?;
        self.section_range = section_range(self.section, viewport.height);
        self.button_gesture
            .set_bounds(node_rect(&layout, PageNode::Button)?);
        self.tracker.resize(layout.document_height(), viewport);
        self.layout = layout;
        self.config.viewport.width = viewport.width;
        self.config.viewport.height = viewport.height;
        self.sync_scroll()
    }

    /// Handle a pointer event positioned in viewport coordinates
    pub fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        let position = event.position.offset(0.0, self.tracker.scroll_y());
        let event = PointerEvent::new(event.kind, position);

        if let Some(state) = self.button_gesture.handle(&event) {
            self.button.apply_gesture(state, &mut self.scheduler)?;
        }

        match event.kind {
            PointerKind::Down if self.drag_handle_rect().contains(position) => {
                self.drag_captured = true;
                self.drag.start(position);
            }
            PointerKind::Move if self.drag_captured => self.drag.update(position),
            PointerKind::Up | PointerKind::Cancel if self.drag_captured => {
                self.drag_captured = false;
                self.drag.release();
            }
            _ => {}
        }
        Ok(())
    }

    /// Current drag handle bounds, including its drag offset
    pub fn drag_handle_rect(&self) -> Rect {
        let offset = self.drag.offset();
        self.layout
            .rect(PageNode::DragHandle)
            .map(|rect| rect.translate(offset.x, offset.y))
            .unwrap_or(Rect::ZERO)
    }

    /// Every animated value at the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let s = &self.scheduler;
        let grid_opacity = self.grid.parent().scalar(Property::Opacity, s);
        let drag = self.drag.offset();
        let path_length = self.icon.scalar(Property::PathLength, s);
        let dash = self.icon_path.dash_for(path_length);

        let contents = [
            CellContent::Fade {
                square_opacity: self.fade_square.scalar(Property::Opacity, s),
                square_y: self.fade_square.scalar(Property::Y, s),
                circle_opacity: self.fade_circle.scalar(Property::Opacity, s),
                circle_y: self.fade_circle.scalar(Property::Y, s),
            },
            CellContent::Shape {
                scale: self.shape.scalar(Property::Scale, s),
                rotate: self.shape.scalar(Property::Rotate, s),
                border_radius_percent: self.shape.scalar(Property::BorderRadius, s),
            },
            CellContent::Button {
                scale: self.button.scalar(Property::Scale, s),
                background: color_of(&self.button, Property::BackgroundColor, s).to_string(),
                gesture: self.button_gesture.state(),
            },
            CellContent::Drag {
                x: drag.x,
                y: drag.y,
                phase: self.drag.phase(),
            },
            CellContent::ScrollProgress {
                scale_y: self.progress_fill.scalar(Property::ScaleY, s),
            },
            CellContent::Icon {
                opacity: self.icon.scalar(Property::Opacity, s),
                path_length,
                dash: dash.dash,
                gap: dash.gap,
                fill: color_of(&self.icon, Property::Fill, s).to_string(),
            },
        ];

        let cells = self
            .grid
            .children()
            .iter()
            .zip(contents)
            .enumerate()
            .map(|(index, (cell, content))| {
                let opacity = cell.scalar(Property::Opacity, s);
                CellSnapshot {
                    index,
                    opacity,
                    effective_opacity: opacity * grid_opacity,
                    content,
                }
            })
            .collect();

        let paragraphs = self
            .paragraphs
            .iter()
            .enumerate()
            .map(|(index, (paragraph, _))| ParagraphSnapshot {
                index,
                translate_x_percent: paragraph.scalar(Property::TranslateX, s),
            })
            .collect();

        FrameSnapshot {
            time_ms: self.elapsed_ms(),
            scroll: ScrollSnapshot {
                y: self.tracker.scroll_y(),
                page_progress: self.tracker.page_progress(),
                section_progress: self.tracker.progress(&self.section_range),
            },
            grid_opacity,
            cells,
            heading: HeadingSnapshot {
                visible: self.heading_visible(),
                opacity: self.heading.scalar(Property::Opacity, s),
                y: self.heading.scalar(Property::Y, s),
            },
            paragraphs,
        }
    }

    /// Tear the page down; returns how many motion values were dropped
    pub fn unmount(mut self) -> usize {
        let scheduler = &mut self.scheduler;
        let mut removed = self.grid.unmount(scheduler);
        for element in [
            &mut self.fade_square,
            &mut self.fade_circle,
            &mut self.shape,
            &mut self.button,
            &mut self.progress_fill,
            &mut self.icon,
            &mut self.heading,
        ] {
            removed += element.unmount(scheduler);
        }
        for (paragraph, _) in &mut self.paragraphs {
            removed += paragraph.unmount(scheduler);
        }
        tracing::debug!(removed, remaining = scheduler.len(), "showcase unmounted");
        removed
    }

    /// Push the scroll position into every scroll-linked value
    fn sync_scroll(&mut self) -> Result<()> {
        let page = self.tracker.page_progress();
        self.progress_fill
            .set_value(Property::ScaleY, Value::Number(page), &mut self.scheduler)?;

        let section = self.tracker.progress(&self.section_range);
        for (paragraph, slide) in &mut self.paragraphs {
            paragraph.set_value(Property::TranslateX, slide.apply(section), &mut self.scheduler)?;
        }

        let viewport = self.tracker.viewport_rect();
        if self.section_observer.observe(self.section, viewport) == Some(InViewChange::Entered) {
            tracing::debug!(scroll_y = self.tracker.scroll_y(), "scroll section in view");
            self.heading_controls.start(VISIBLE);
        }
        self.heading.poll_controls(&mut self.scheduler)?;
        Ok(())
    }
}

fn node_rect(layout: &PageLayout, node: PageNode) -> Result<Rect> {
    layout
        .rect(node)
        .ok_or_else(|| ShowcaseError::MissingNode(node.to_string()))
}

/// Range from the section's top meeting the viewport bottom to its bottom
/// meeting the viewport bottom
fn section_range(section: Rect, viewport_height: f32) -> ScrollRange {
    ScrollRange::resolve(
        ScrollOffset::START_END,
        ScrollOffset::END_END,
        section,
        viewport_height,
    )
}

fn color_of(element: &MotionElement, property: Property, scheduler: &AnimationScheduler) -> Color {
    element
        .value(property, scheduler)
        .and_then(|v| v.as_color())
        .unwrap_or(Color::TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_layout::DragPhase;

    fn showcase() -> Showcase {
        Showcase::mount(ShowcaseConfig::default()).unwrap()
    }

    fn run(showcase: &mut Showcase, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            showcase.tick(16.0).unwrap();
            elapsed += 16.0;
        }
    }

    fn viewport_center(showcase: &Showcase, node: PageNode) -> (f32, f32) {
        let center = showcase.layout().rect(node).unwrap().center();
        (center.x, center.y - showcase.scroll_y())
    }

    #[test]
    fn test_mount_starts_hidden() {
        let showcase = showcase();
        let snapshot = showcase.snapshot();

        assert_eq!(snapshot.cells.len(), 6);
        assert_eq!(snapshot.grid_opacity, 0.0);
        assert!(snapshot.cells.iter().all(|c| c.opacity == 0.0));
        assert!(!snapshot.heading.visible);
        assert_eq!(snapshot.heading.y, 75.0);
        assert_eq!(snapshot.paragraphs[0].translate_x_percent, -100.0);
        assert_eq!(snapshot.paragraphs[1].translate_x_percent, 100.0);
    }

    #[test]
    fn test_default_geometry() {
        let showcase = showcase();
        assert!((showcase.max_scroll() - 530.67).abs() < 0.01);
        let range = showcase.section_range();
        assert!((range.start_y() - 106.67).abs() < 0.01);
        assert!((range.end_y() - 490.67).abs() < 0.01);
    }

    #[test]
    fn test_scroll_reveals_heading() {
        let mut showcase = showcase();
        run(&mut showcase, 1000.0);
        assert!(!showcase.heading_visible());

        showcase.scroll_to(200.0).unwrap();
        assert!(showcase.heading_visible());

        run(&mut showcase, 3000.0);
        let heading = showcase.snapshot().heading;
        assert_eq!(heading.opacity, 1.0);
        assert!(heading.y.abs() < 0.5);
    }

    #[test]
    fn test_scroll_clamps_and_drives_progress() {
        let mut showcase = showcase();
        let reached = showcase.scroll_to(10_000.0).unwrap();
        assert_eq!(reached, showcase.max_scroll());

        let snapshot = showcase.snapshot();
        assert_eq!(snapshot.scroll.page_progress, 1.0);
        assert_eq!(snapshot.scroll.section_progress, 1.0);
        assert!(matches!(
            snapshot.cell(4).map(|c| &c.content),
            Some(CellContent::ScrollProgress { scale_y }) if *scale_y == 1.0
        ));
        assert_eq!(snapshot.paragraphs[0].translate_x_percent, 0.0);

        showcase.scroll_by(-10_000.0).unwrap();
        assert_eq!(showcase.snapshot().paragraphs[1].translate_x_percent, 100.0);
    }

    #[test]
    fn test_nan_scroll_keeps_progress() {
        let mut showcase = showcase();
        showcase.scroll_to(200.0).unwrap();
        let before = showcase.snapshot();

        assert_eq!(showcase.scroll_to(f32::NAN).unwrap(), 200.0);
        let after = showcase.snapshot();
        assert_eq!(after.scroll, before.scroll);
        assert!((0.0..=1.0).contains(&after.scroll.section_progress));
        for (a, b) in after.paragraphs.iter().zip(&before.paragraphs) {
            assert_eq!(a.translate_x_percent, b.translate_x_percent);
        }
    }

    #[test]
    fn test_tick_after_long_pause() {
        let mut showcase = showcase();
        showcase.scroll_to(200.0).unwrap();
        run(&mut showcase, 400.0);

        // The heading spring is mid-flight when the host stalls
        showcase.tick(5.0e8).unwrap();
        let heading = showcase.snapshot().heading;
        assert_eq!(heading.opacity, 1.0);
        assert_eq!(heading.y, 0.0);
    }

    #[test]
    fn test_button_hover_and_tap() {
        let mut showcase = showcase();
        let (x, y) = viewport_center(&showcase, PageNode::Button);

        showcase.pointer(PointerEvent::moved(x, y)).unwrap();
        assert_eq!(showcase.button_state(), GestureState::Hovered);
        run(&mut showcase, 400.0);
        assert!(matches!(
            showcase.snapshot().cell(2).map(|c| &c.content),
            Some(CellContent::Button { scale, .. }) if (*scale - 1.1).abs() < 1e-4
        ));

        showcase.pointer(PointerEvent::down(x, y)).unwrap();
        showcase.pointer(PointerEvent::up(x, y)).unwrap();
        assert_eq!(showcase.button_taps(), 1);
    }

    #[test]
    fn test_drag_stays_within_constraints() {
        let mut showcase = showcase();
        let (x, y) = viewport_center(&showcase, PageNode::DragHandle);

        showcase.pointer(PointerEvent::down(x, y)).unwrap();
        for step in 1..=10 {
            showcase
                .pointer(PointerEvent::moved(x + step as f32 * 40.0, y - step as f32 * 5.0))
                .unwrap();
            showcase.tick(16.0).unwrap();
        }
        assert_eq!(showcase.drag().phase(), DragPhase::Dragging);
        assert_eq!(showcase.drag().offset().x, elements::DRAG_DISTANCE);

        showcase.pointer(PointerEvent::up(x + 400.0, y - 50.0)).unwrap();
        for _ in 0..200 {
            showcase.tick(16.0).unwrap();
            let offset = showcase.drag().offset();
            assert!(offset.x.abs() <= elements::DRAG_DISTANCE);
            assert!(offset.y.abs() <= elements::DRAG_DISTANCE);
        }
        assert_eq!(showcase.drag().phase(), DragPhase::Idle);
    }

    #[test]
    fn test_pointer_outside_handle_does_not_drag() {
        let mut showcase = showcase();
        showcase.pointer(PointerEvent::down(5.0, 5.0)).unwrap();
        showcase.pointer(PointerEvent::moved(200.0, 200.0)).unwrap();
        assert_eq!(showcase.drag().phase(), DragPhase::Idle);
    }

    #[test]
    fn test_resize_relayouts() {
        let mut showcase = showcase();
        showcase.scroll_to(500.0).unwrap();
        showcase.resize(Size::new(640.0, 2000.0)).unwrap();
        // The whole page fits, so nothing scrolls
        assert_eq!(showcase.scroll_y(), 0.0);
        assert!(showcase.resize(Size::new(0.0, 100.0)).is_err());
    }

    #[test]
    fn test_unmount_drops_every_value() {
        let showcase = showcase();
        let values = showcase.scheduler().len();
        assert_eq!(showcase.unmount(), values);
    }
}
