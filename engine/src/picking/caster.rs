//! Picker
//!
//! Resolves the pointer to the structure under it and turns raw pointer
//! input into hover and click events.
//!
//! Pointer moves only record the screen position; the ray is cast once per
//! [`Picker::update`] call, so a burst of move events costs one
//! intersection per frame.

use glam::Vec3;

use super::events::{PickerError, PickerEvent, PickerEventKind, SubscriptionId, Subscribers};
use super::ray::{PickCamera, Ray};
use super::scene::{Intersection, PickScene};
use crate::input::{ButtonState, Modifiers, MouseButton, PointerInput, ScreenPosition, ScrollDelta};

/// Pointer-to-structure resolver for one view.
///
/// `S` is the back-reference type stored on pickable objects, usually
/// [`StructureRef`](super::StructureRef). Structures are compared by value,
/// so `S` must identify one structure uniquely.
#[derive(Debug)]
pub struct Picker<S> {
    picked: Option<S>,
    selected: Option<S>,
    hit_position: Vec3,
    hit_distance: f32,
    all_hits: Vec<Intersection<S>>,
    ray: Option<Ray>,
    screen_position: ScreenPosition,
    modifiers: Modifiers,
    buttons: ButtonState,
    wheel: i32,
    active: bool,
    prevent_default: bool,
    disposed: bool,
    subscribers: Subscribers<S>,
}

impl<S> Default for Picker<S> {
    fn default() -> Self {
        Self {
            picked: None,
            selected: None,
            hit_position: Vec3::ZERO,
            hit_distance: 0.0,
            all_hits: Vec::new(),
            ray: None,
            screen_position: ScreenPosition::default(),
            modifiers: Modifiers::default(),
            buttons: ButtonState::default(),
            wheel: 0,
            active: true,
            prevent_default: false,
            disposed: false,
            subscribers: Subscribers::default(),
        }
    }
}

impl<S: Clone + PartialEq> Picker<S> {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // STATE
    // ========================================================================

    /// Structure currently under the pointer.
    pub fn picked(&self) -> Option<&S> {
        self.picked.as_ref()
    }

    /// Structure a press started on, until the press completes or the hover
    /// changes.
    pub fn selected(&self) -> Option<&S> {
        self.selected.as_ref()
    }

    /// World position of the last nearest hit.
    pub fn hit_position(&self) -> Vec3 {
        self.hit_position
    }

    /// Ray distance of the last nearest hit.
    pub fn hit_distance(&self) -> f32 {
        self.hit_distance
    }

    /// Every hit from the last cast, nearest first.
    pub fn all_hits(&self) -> &[Intersection<S>] {
        &self.all_hits
    }

    /// Ray cast by the last update that ran, `None` before the first one.
    pub fn ray(&self) -> Option<Ray> {
        self.ray
    }

    pub fn screen_position(&self) -> ScreenPosition {
        self.screen_position
    }

    /// Modifier keys recorded by the last press or release.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn buttons(&self) -> ButtonState {
        self.buttons
    }

    /// Signed wheel counter, one step per wheel event.
    pub fn wheel(&self) -> i32 {
        self.wheel
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enables or disables casting and wheel handling. Hover and selection
    /// are kept, so re-enabling resumes where it left off.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ========================================================================
    // SUBSCRIPTIONS
    // ========================================================================

    /// Registers `callback` for events of `kind`.
    pub fn on(
        &mut self,
        kind: PickerEventKind,
        callback: impl FnMut(&PickerEvent<S>) + 'static,
    ) -> Result<SubscriptionId, PickerError> {
        if self.disposed {
            log::warn!("subscription to '{kind}' on a disposed picker");
            return Err(PickerError::Disposed);
        }
        Ok(self.subscribers.add(kind, callback))
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drops every subscriber and stops reacting to input.
    ///
    /// `update` and the input handlers stay callable afterwards and do
    /// nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!("disposing picker with {} subscribers", self.subscribers.len());
        self.subscribers.clear();
        self.disposed = true;
        self.active = false;
    }

    fn emit(&mut self, event: PickerEvent<S>) {
        self.subscribers.dispatch(&event);
    }

    // ========================================================================
    // CASTING
    // ========================================================================

    /// Casts the pointer ray into `scene` and emits hover changes.
    ///
    /// A change of hovered structure emits `Out` for the old one, then
    /// `Over` for the new one, and cancels any pending click.
    pub fn update(&mut self, scene: &impl PickScene<S>, camera: &PickCamera) {
        if !self.active || self.disposed {
            return;
        }

        let ray = camera.ray(self.screen_position.ndc);
        let hits = scene.intersect(&ray);
        self.ray = Some(ray);

        match hits.first() {
            Some(nearest) => {
                if self.picked.as_ref() != Some(&nearest.structure) {
                    if let Some(old) = self.picked.take() {
                        self.emit(PickerEvent::Out(old));
                    }
                    self.picked = Some(nearest.structure.clone());
                    self.selected = None;
                    self.emit(PickerEvent::Over(nearest.structure.clone()));
                }
                self.hit_position = nearest.point;
                self.hit_distance = nearest.distance;
            }
            None => {
                if let Some(old) = self.picked.take() {
                    self.emit(PickerEvent::Out(old));
                }
                self.selected = None;
            }
        }

        self.all_hits = hits;
    }

    /// Where the pointer ray meets the horizontal plane `y = height`.
    pub fn pointer_on_plane(&self, camera: &PickCamera, height: f32) -> Option<Vec3> {
        camera.ray(self.screen_position.ndc).intersect_plane_y(height)
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Suppresses the next press. The guard resets after one use.
    pub fn prevent_default(&mut self) {
        self.prevent_default = true;
    }

    pub fn handle_input(&mut self, input: PointerInput) {
        match input {
            PointerInput::Down { button, modifiers } => self.handle_down(button, modifiers),
            PointerInput::Up { button, modifiers } => self.handle_up(button, modifiers),
            PointerInput::Move(position) => self.handle_move(position),
            PointerInput::Wheel(delta) => self.handle_wheel(delta),
        }
    }

    /// Records the hovered structure as the press target and emits `Down`.
    pub fn handle_down(&mut self, button: MouseButton, modifiers: Modifiers) {
        if self.disposed {
            return;
        }
        if self.prevent_default {
            self.prevent_default = false;
            return;
        }
        if self.picked.is_some() {
            self.selected = self.picked.clone();
        }
        self.modifiers = modifiers;
        self.buttons.set(button, true);
        self.emit(PickerEvent::Down(self.picked.clone()));
    }

    /// Emits `Up`, then `Click` when the release lands on the structure the
    /// press started on.
    pub fn handle_up(&mut self, button: MouseButton, modifiers: Modifiers) {
        if self.disposed {
            return;
        }
        self.modifiers = modifiers;
        self.emit(PickerEvent::Up(self.picked.clone()));

        match (self.selected.take(), self.picked.clone()) {
            (Some(selected), Some(picked)) if selected == picked => {
                self.emit(PickerEvent::Click(picked));
            }
            _ => {}
        }
        self.buttons.set(button, false);
    }

    /// Stores the new screen position. Casting waits for the next update.
    pub fn handle_move(&mut self, position: ScreenPosition) {
        if self.disposed {
            return;
        }
        self.screen_position = position;
        self.emit(PickerEvent::Move(position));
    }

    /// Steps the wheel counter by one in the direction of `delta.y`,
    /// saturating at the `i32` bounds.
    pub fn handle_wheel(&mut self, delta: ScrollDelta) {
        if !self.active || self.disposed || delta.y == 0.0 {
            return;
        }
        let step = if delta.y > 0.0 { 1 } else { -1 };
        self.wheel = self.wheel.saturating_add(step);
        self.emit(PickerEvent::Wheel(self.wheel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::ray::Ray;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Scene that always reports `current` as its only hit and counts casts.
    struct StubScene {
        current: Option<u32>,
        casts: Cell<usize>,
    }

    impl StubScene {
        fn new(current: Option<u32>) -> Self {
            Self {
                current,
                casts: Cell::new(0),
            }
        }
    }

    impl PickScene<u32> for StubScene {
        fn intersect(&self, ray: &Ray) -> Vec<Intersection<u32>> {
            self.casts.set(self.casts.get() + 1);
            self.current
                .map(|structure| Intersection {
                    structure,
                    point: ray.at(10.0),
                    distance: 10.0,
                })
                .into_iter()
                .collect()
        }
    }

    fn recorded(picker: &mut Picker<u32>) -> Rc<RefCell<Vec<PickerEvent<u32>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in PickerEventKind::ALL {
            let log = Rc::clone(&log);
            picker
                .on(kind, move |event| log.borrow_mut().push(event.clone()))
                .unwrap();
        }
        log
    }

    fn clicks(log: &RefCell<Vec<PickerEvent<u32>>>) -> usize {
        log.borrow()
            .iter()
            .filter(|event| matches!(event, PickerEvent::Click(_)))
            .count()
    }

    #[test]
    fn test_over_and_out() {
        let camera = PickCamera::default();
        let mut picker = Picker::new();
        let log = recorded(&mut picker);

        let mut scene = StubScene::new(Some(1));
        picker.update(&scene, &camera);
        picker.update(&scene, &camera);
        scene.current = Some(2);
        picker.update(&scene, &camera);
        scene.current = None;
        picker.update(&scene, &camera);

        assert_eq!(
            *log.borrow(),
            vec![
                PickerEvent::Over(1),
                PickerEvent::Out(1),
                PickerEvent::Over(2),
                PickerEvent::Out(2),
            ]
        );
        assert_eq!(picker.picked(), None);
    }

    #[test]
    fn test_hit_state_recorded() {
        let camera = PickCamera::default();
        let mut picker = Picker::new();
        picker.update(&StubScene::new(Some(3)), &camera);
        assert_eq!(picker.picked(), Some(&3));
        assert_eq!(picker.hit_distance(), 10.0);
        assert_eq!(picker.all_hits().len(), 1);
    }

    #[test]
    fn test_click_on_same_structure() {
        let camera = PickCamera::default();
        let scene = StubScene::new(Some(5));
        let mut picker = Picker::new();
        let log = recorded(&mut picker);

        picker.update(&scene, &camera);
        picker.handle_down(MouseButton::Left, Modifiers::shift());
        assert_eq!(picker.selected(), Some(&5));
        assert!(picker.buttons().left);
        assert!(picker.modifiers().shift);

        picker.handle_up(MouseButton::Left, Modifiers::default());
        assert_eq!(clicks(&log), 1);
        assert!(!picker.buttons().left);
        assert_eq!(picker.selected(), None);

        let kinds: Vec<_> = log.borrow().iter().map(PickerEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                PickerEventKind::Over,
                PickerEventKind::Down,
                PickerEventKind::Up,
                PickerEventKind::Click
            ]
        );
    }

    #[test]
    fn test_drag_to_other_structure_is_not_click() {
        let camera = PickCamera::default();
        let mut scene = StubScene::new(Some(1));
        let mut picker = Picker::new();
        let log = recorded(&mut picker);

        picker.update(&scene, &camera);
        picker.handle_down(MouseButton::Left, Modifiers::default());
        scene.current = Some(2);
        picker.update(&scene, &camera);
        picker.handle_up(MouseButton::Left, Modifiers::default());

        assert_eq!(clicks(&log), 0);
        assert!(log.borrow().contains(&PickerEvent::Up(Some(2))));
    }

    #[test]
    fn test_down_on_nothing_emits_down_without_click() {
        let camera = PickCamera::default();
        let mut picker = Picker::new();
        let log = recorded(&mut picker);

        picker.update(&StubScene::new(None), &camera);
        picker.handle_down(MouseButton::Left, Modifiers::default());
        picker.handle_up(MouseButton::Left, Modifiers::default());

        assert_eq!(
            *log.borrow(),
            vec![PickerEvent::Down(None), PickerEvent::Up(None)]
        );
    }

    #[test]
    fn test_inactive_update_does_nothing() {
        let camera = PickCamera::default();
        let scene = StubScene::new(Some(1));
        let mut picker = Picker::new();
        let log = recorded(&mut picker);

        picker.set_active(false);
        picker.update(&scene, &camera);
        assert_eq!(scene.casts.get(), 0);
        assert!(log.borrow().is_empty());

        picker.set_active(true);
        picker.update(&scene, &camera);
        assert_eq!(scene.casts.get(), 1);
    }

    #[test]
    fn test_disable_keeps_hover() {
        let camera = PickCamera::default();
        let mut picker = Picker::new();
        picker.update(&StubScene::new(Some(4)), &camera);
        picker.set_active(false);
        picker.update(&StubScene::new(None), &camera);
        assert_eq!(picker.picked(), Some(&4));
    }

    #[test]
    fn test_prevent_default_is_single_shot() {
        let camera = PickCamera::default();
        let scene = StubScene::new(Some(1));
        let mut picker = Picker::new();
        let log = recorded(&mut picker);
        picker.update(&scene, &camera);

        picker.prevent_default();
        picker.handle_down(MouseButton::Left, Modifiers::default());
        assert_eq!(picker.selected(), None);

        picker.handle_down(MouseButton::Left, Modifiers::default());
        assert_eq!(picker.selected(), Some(&1));
        let downs = log
            .borrow()
            .iter()
            .filter(|event| event.kind() == PickerEventKind::Down)
            .count();
        assert_eq!(downs, 1);
    }

    #[test]
    fn test_wheel_counter() {
        let mut picker: Picker<u32> = Picker::new();
        let log = recorded(&mut picker);

        picker.handle_wheel(ScrollDelta::from_lines(0.0, 1.0));
        picker.handle_wheel(ScrollDelta::from_lines(0.0, 3.0));
        picker.handle_wheel(ScrollDelta::from_lines(0.0, -1.0));
        picker.handle_wheel(ScrollDelta::default());
        assert_eq!(picker.wheel(), 1);
        assert_eq!(
            *log.borrow(),
            vec![
                PickerEvent::Wheel(1),
                PickerEvent::Wheel(2),
                PickerEvent::Wheel(1)
            ]
        );

        picker.set_active(false);
        picker.handle_wheel(ScrollDelta::from_lines(0.0, 1.0));
        assert_eq!(picker.wheel(), 1);
    }

    #[test]
    fn test_wheel_counter_saturates() {
        let mut picker: Picker<u32> = Picker::new();
        picker.wheel = i32::MAX;
        picker.handle_wheel(ScrollDelta::from_lines(0.0, 1.0));
        assert_eq!(picker.wheel(), i32::MAX);

        picker.wheel = i32::MIN;
        picker.handle_wheel(ScrollDelta::from_lines(0.0, -1.0));
        assert_eq!(picker.wheel(), i32::MIN);
    }

    #[test]
    fn test_last_ray_is_kept() {
        let camera = PickCamera::looking_at(Vec3::new(0.0, 40.0, 0.0), Vec3::ZERO);
        let mut picker: Picker<u32> = Picker::new();
        assert!(picker.ray().is_none());

        picker.set_active(false);
        picker.update(&StubScene::new(Some(1)), &camera);
        assert!(picker.ray().is_none());

        picker.set_active(true);
        picker.update(&StubScene::new(None), &camera);
        let ray = picker.ray().unwrap();
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - Vec3::NEG_Y).length() < 1e-3);
    }

    #[test]
    fn test_move_records_position_without_casting() {
        let mut picker: Picker<u32> = Picker::new();
        let log = recorded(&mut picker);
        let position = ScreenPosition::from_pixels(0.0, 0.0, 100.0, 100.0);

        picker.handle_input(PointerInput::Move(position));
        assert_eq!(picker.screen_position(), position);
        assert!(picker.all_hits().is_empty());
        assert_eq!(*log.borrow(), vec![PickerEvent::Move(position)]);
    }

    #[test]
    fn test_off_removes_callback() {
        let mut picker: Picker<u32> = Picker::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let id = picker
            .on(PickerEventKind::Wheel, move |_| counter.set(counter.get() + 1))
            .unwrap();

        picker.handle_wheel(ScrollDelta::from_lines(0.0, 1.0));
        assert!(picker.off(id));
        picker.handle_wheel(ScrollDelta::from_lines(0.0, 1.0));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_dispose() {
        let camera = PickCamera::default();
        let scene = StubScene::new(Some(1));
        let mut picker = Picker::new();
        let log = recorded(&mut picker);

        picker.dispose();
        assert!(picker.is_disposed());
        assert_eq!(picker.subscriber_count(), 0);

        picker.update(&scene, &camera);
        picker.handle_down(MouseButton::Left, Modifiers::default());
        picker.handle_up(MouseButton::Left, Modifiers::default());
        assert_eq!(scene.casts.get(), 0);
        assert!(log.borrow().is_empty());

        assert_eq!(
            picker.on(PickerEventKind::Click, |_| {}),
            Err(PickerError::Disposed)
        );
        picker.dispose();
    }

    #[test]
    fn test_pointer_on_plane() {
        let camera = PickCamera::looking_at(Vec3::new(0.0, 40.0, 0.0), Vec3::ZERO);
        let picker: Picker<u32> = Picker::new();
        let point = picker.pointer_on_plane(&camera, 0.0).unwrap();
        assert!(point.length() < 1e-3);
    }
}
