//! Arc lifecycle: creation, per-frame animation, and removal.
//!
//! Each arc moves through `Waiting -> Animating -> Completed -> Removing`.
//! An arc takes at most one phase transition per [`ArcEngine::update`], and
//! arcs that reach `Removing` are released at the end of that same update.

use std::collections::BTreeMap;
use std::fmt;

use foundation::ids::IdSequence;
use foundation::math::Projector;
use foundation::time::Time;
use scene::draw::{Group, RenderFrame};
use scene::material::Material;
use scene::mesh::DrawRange;
use scene::object::SceneObject;
use scene::prefabs::markers::{point_marker, surface_ring};
use scene::resources::ResourceTracker;
use tracing::{debug, trace};

use super::geometry::{ArcAltitude, ArcGeometry, build_arc_geometry};
use super::options::{ArcDefaults, ArcError, ArcOptions, ArcTiming, ResolvedArcOptions, Toggle, resolve};
use super::ring::{RingAnimation, RingSettings};
use super::window::{DrawMode, draw_window, end_reveal_reached, final_window, progress};

pub const MIN_VELOCITY_DURATION_MS: f64 = 500.0;
pub const MAX_VELOCITY_DURATION_MS: f64 = 10_000.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArcId(pub u64);

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arc-{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArcPhase {
    Waiting,
    Animating,
    Completed,
    Removing,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcEngineSettings {
    pub radius: f64,
    /// Base peak altitude (fraction of radius) for arcs without an explicit one.
    pub arc_altitude: f64,
    pub marker_radius: f64,
    pub rings: RingSettings,
}

impl Default for ArcEngineSettings {
    fn default() -> Self {
        Self {
            radius: 100.0,
            arc_altitude: 0.1,
            marker_radius: 0.5,
            rings: RingSettings::default(),
        }
    }
}

/// Animation duration: a positive velocity (units per second) wins and is
/// clamped; otherwise the fixed duration is used as given.
pub fn resolve_duration(timing: &ArcTiming, length: f64) -> f64 {
    match timing.velocity {
        Some(v) if v > 0.0 => {
            (length / v * 1000.0).clamp(MIN_VELOCITY_DURATION_MS, MAX_VELOCITY_DURATION_MS)
        }
        _ => timing.duration_ms,
    }
}

/// Read-only view of an arc's animation state.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSnapshot {
    pub id: ArcId,
    pub phase: ArcPhase,
    pub duration_ms: f64,
    pub length: f64,
    pub tubular_segments: usize,
    pub index_stride: usize,
    pub draw_range: DrawRange,
    pub tube_visible: bool,
    pub start_point_visible: bool,
    pub end_point_visible: bool,
    pub end_revealed: bool,
    pub start_ring: RingAnimation,
    pub end_ring: RingAnimation,
}

#[derive(Debug)]
struct ArcVisuals {
    tube: SceneObject,
    start_point: Option<SceneObject>,
    end_point: Option<SceneObject>,
    start_ring: Option<SceneObject>,
    end_ring: Option<SceneObject>,
}

impl ArcVisuals {
    fn markers(&self) -> impl Iterator<Item = &SceneObject> {
        [
            &self.start_point,
            &self.end_point,
            &self.start_ring,
            &self.end_ring,
        ]
        .into_iter()
        .flatten()
    }

    fn dispose(&mut self) {
        self.tube.dispose();
        for object in [
            &mut self.start_point,
            &mut self.end_point,
            &mut self.start_ring,
            &mut self.end_ring,
        ]
        .into_iter()
        .flatten()
        {
            object.dispose();
        }
    }
}

#[derive(Debug)]
struct ActiveArc {
    id: ArcId,
    options: ArcOptions,
    timing: ArcTiming,
    mode: DrawMode,
    duration_ms: f64,
    length: f64,
    segments: usize,
    stride: usize,
    phase: ArcPhase,
    phase_started: Time,
    end_revealed: bool,
    start_ring: RingAnimation,
    end_ring: RingAnimation,
    visuals: ArcVisuals,
}

impl ActiveArc {
    fn new(
        id: ArcId,
        options: ArcOptions,
        resolved: ResolvedArcOptions,
        geometry: ArcGeometry,
        now: Time,
        tracker: &ResourceTracker,
        settings: &ArcEngineSettings,
    ) -> Self {
        let color = resolved.color;
        let segments = geometry.tube.tubular_segments;
        let stride = geometry.tube.index_stride();
        let duration_ms = resolve_duration(&resolved.timing, geometry.length);

        let mut tube = SceneObject::new(
            tracker,
            "arc",
            geometry.tube.buffers,
            Material::new(tracker, color),
        )
        .hidden();
        tube.geometry.set_draw_range(DrawRange::EMPTY);

        let point = |toggle: Toggle, position| {
            toggle.visible.then(|| {
                point_marker(tracker, position, settings.marker_radius, toggle.color_or(color)).hidden()
            })
        };
        let ring = |toggle: Toggle, position| {
            toggle.visible.then(|| {
                surface_ring(
                    tracker,
                    position,
                    settings.rings.radius,
                    settings.rings.min_scale,
                    toggle.color_or(color),
                )
            })
        };
        let visuals = ArcVisuals {
            tube,
            start_point: point(resolved.start_point, geometry.start),
            end_point: point(resolved.end_point, geometry.end),
            start_ring: ring(resolved.start_ring, geometry.start),
            end_ring: ring(resolved.end_ring, geometry.end),
        };

        let start_ring = if resolved.start_ring.visible {
            RingAnimation::armed(&settings.rings)
        } else {
            RingAnimation::disabled()
        };
        let end_ring = if resolved.end_ring.visible {
            RingAnimation::waiting(&settings.rings)
        } else {
            RingAnimation::disabled()
        };

        let mut arc = Self {
            id,
            options,
            timing: resolved.timing,
            mode: DrawMode::new(resolved.flying, resolved.flying_length),
            duration_ms,
            length: geometry.length,
            segments,
            stride,
            phase: ArcPhase::Waiting,
            phase_started: now,
            end_revealed: false,
            start_ring,
            end_ring,
            visuals,
        };
        if arc.timing.start_delay_ms <= 0.0 {
            arc.start_animating(now, &settings.rings);
        }
        arc
    }

    fn start_animating(&mut self, now: Time, rings: &RingSettings) {
        self.phase = ArcPhase::Animating;
        self.phase_started = now;
        self.visuals.tube.set_visible(true);
        if let Some(point) = self.visuals.start_point.as_mut() {
            point.set_visible(true);
        }
        self.start_ring.begin_fade(rings);
    }

    fn reveal_end(&mut self) {
        self.end_revealed = true;
        if let Some(point) = self.visuals.end_point.as_mut() {
            point.set_visible(true);
        }
        self.end_ring.reveal();
    }

    fn complete(&mut self, now: Time, rings: &RingSettings) {
        self.visuals
            .tube
            .geometry
            .set_draw_range(final_window(self.mode, self.segments, self.stride));
        if !self.end_revealed {
            self.reveal_end();
        }
        self.end_ring.begin_fade(rings);
        self.phase = ArcPhase::Completed;
        self.phase_started = now;
    }

    fn advance(&mut self, now: Time, rings: &RingSettings) {
        let elapsed = now.since(self.phase_started);
        match self.phase {
            ArcPhase::Waiting => {
                if elapsed >= self.timing.start_delay_ms {
                    self.start_animating(now, rings);
                }
            }
            ArcPhase::Animating => {
                let p = progress(elapsed, self.duration_ms);
                if p >= 1.0 {
                    self.complete(now, rings);
                } else {
                    let range = draw_window(self.mode, p, self.segments, self.stride);
                    self.visuals.tube.geometry.set_draw_range(range);
                    if !self.end_revealed && end_reveal_reached(self.mode, p) {
                        self.reveal_end();
                    }
                }
            }
            ArcPhase::Completed => {
                if elapsed >= self.timing.end_delay_ms {
                    self.phase = ArcPhase::Removing;
                }
            }
            ArcPhase::Removing => {}
        }

        if self.phase != ArcPhase::Waiting {
            self.start_ring.tick(rings);
            self.end_ring.tick(rings);
        }
        sync_ring(&self.start_ring, self.visuals.start_ring.as_mut());
        sync_ring(&self.end_ring, self.visuals.end_ring.as_mut());
    }

    fn snapshot(&self) -> ArcSnapshot {
        let visible = |object: &Option<SceneObject>| object.as_ref().is_some_and(SceneObject::is_visible);
        ArcSnapshot {
            id: self.id,
            phase: self.phase,
            duration_ms: self.duration_ms,
            length: self.length,
            tubular_segments: self.segments,
            index_stride: self.stride,
            draw_range: self.visuals.tube.geometry.draw_range(),
            tube_visible: self.visuals.tube.is_visible(),
            start_point_visible: visible(&self.visuals.start_point),
            end_point_visible: visible(&self.visuals.end_point),
            end_revealed: self.end_revealed,
            start_ring: self.start_ring,
            end_ring: self.end_ring,
        }
    }
}

fn sync_ring(animation: &RingAnimation, object: Option<&mut SceneObject>) {
    let Some(object) = object else {
        return;
    };
    object.set_visible(animation.is_visible());
    object.transform.scale = animation.scale;
    object.material.set_opacity(animation.opacity as f32);
}

pub type RemovalCallback = Box<dyn FnMut(ArcId, &ArcOptions)>;

/// Owns every live arc together with its tube, markers and rings.
pub struct ArcEngine {
    tracker: ResourceTracker,
    settings: ArcEngineSettings,
    defaults: ArcDefaults,
    ids: IdSequence,
    arcs: BTreeMap<ArcId, ActiveArc>,
    on_removed: Option<RemovalCallback>,
}

impl fmt::Debug for ArcEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcEngine")
            .field("settings", &self.settings)
            .field("arcs", &self.arcs.len())
            .field("next_id", &self.ids.peek())
            .finish()
    }
}

impl ArcEngine {
    pub fn new(tracker: ResourceTracker, settings: ArcEngineSettings) -> Self {
        Self {
            tracker,
            settings,
            defaults: ArcDefaults::default(),
            ids: IdSequence::new(),
            arcs: BTreeMap::new(),
            on_removed: None,
        }
    }

    pub fn settings(&self) -> &ArcEngineSettings {
        &self.settings
    }

    /// Ring and altitude changes apply from the next update; radius and
    /// marker size only to arcs added afterwards.
    pub fn settings_mut(&mut self) -> &mut ArcEngineSettings {
        &mut self.settings
    }

    pub fn defaults(&self) -> &ArcDefaults {
        &self.defaults
    }

    pub fn set_defaults(&mut self, defaults: ArcDefaults) {
        self.defaults = defaults;
    }

    pub fn on_removed(&mut self, callback: impl FnMut(ArcId, &ArcOptions) + 'static) {
        self.on_removed = Some(Box::new(callback));
    }

    pub fn add(&mut self, options: ArcOptions, now: Time) -> Result<ArcId, ArcError> {
        let resolved = resolve(&options, &self.defaults)?;
        let altitude = match resolved.altitude {
            Some(fraction) => ArcAltitude::Fixed(fraction),
            None => ArcAltitude::Scaled(self.settings.arc_altitude),
        };
        let projector = Projector::new(self.settings.radius);
        let geometry = build_arc_geometry(
            &projector,
            resolved.start,
            resolved.end,
            altitude,
            resolved.width,
        );

        let id = ArcId(self.ids.next_id());
        let arc = ActiveArc::new(id, options, resolved, geometry, now, &self.tracker, &self.settings);
        debug!(
            arc = %id,
            duration_ms = arc.duration_ms,
            length = arc.length,
            segments = arc.segments,
            "arc added"
        );
        self.arcs.insert(id, arc);
        Ok(id)
    }

    /// Remove and release one arc, firing the removal callback. Returns
    /// false for unknown or already removed ids.
    pub fn remove(&mut self, id: ArcId) -> bool {
        let Some(mut arc) = self.arcs.remove(&id) else {
            return false;
        };
        arc.visuals.dispose();
        debug!(arc = %id, phase = ?arc.phase, "arc removed");
        if let Some(callback) = self.on_removed.as_mut() {
            callback(id, &arc.options);
        }
        true
    }

    /// Release every arc without firing removal callbacks.
    pub fn clear(&mut self) {
        let count = self.arcs.len();
        for arc in self.arcs.values_mut() {
            arc.visuals.dispose();
        }
        self.arcs.clear();
        debug!(count, "arcs cleared");
    }

    pub fn update(&mut self, now: Time) {
        let rings = self.settings.rings;
        let mut finished = Vec::new();
        for (id, arc) in self.arcs.iter_mut() {
            arc.advance(now, &rings);
            if arc.phase == ArcPhase::Removing {
                finished.push(*id);
            }
        }
        for id in finished {
            self.remove(id);
        }
        trace!(active = self.arcs.len(), "arcs advanced");
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.arcs.keys().copied()
    }

    pub fn contains(&self, id: ArcId) -> bool {
        self.arcs.contains_key(&id)
    }

    pub fn arc_snapshot(&self, id: ArcId) -> Option<ArcSnapshot> {
        self.arcs.get(&id).map(ActiveArc::snapshot)
    }

    /// Queue tubes under [`Group::Arcs`] and endpoint markers under
    /// [`Group::Markers`].
    pub fn collect_draws<'a>(&'a self, frame: &mut RenderFrame<'a>) {
        for arc in self.arcs.values() {
            frame.push(Group::Arcs, &arc.visuals.tube);
            frame.extend(Group::Markers, arc.visuals.markers());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ArcEngine, ArcEngineSettings, ArcId, ArcPhase, MAX_VELOCITY_DURATION_MS,
        MIN_VELOCITY_DURATION_MS,
    };
    use crate::arcs::options::{ArcError, ArcOptions};
    use crate::arcs::ring::RingPhase;
    use foundation::math::LatLng;
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use scene::draw::{Group, RenderFrame};
    use scene::mesh::DrawRange;
    use scene::resources::ResourceTracker;
    use std::cell::RefCell;
    use std::rc::Rc;

    const NYC: LatLng = LatLng::new(40.7128, -74.006);
    const LONDON: LatLng = LatLng::new(51.5074, -0.1278);

    fn engine() -> (ArcEngine, ResourceTracker) {
        let tracker = ResourceTracker::new();
        (
            ArcEngine::new(tracker.clone(), ArcEngineSettings::default()),
            tracker,
        )
    }

    fn t(ms: f64) -> Time {
        Time(ms)
    }

    #[test]
    fn velocity_sets_duration_from_length() {
        let (mut engine, _) = engine();
        let id = engine
            .add(ArcOptions::new(NYC, LONDON).with_velocity(80.0), t(0.0))
            .expect("add");
        let snap = engine.arc_snapshot(id).expect("snapshot");
        assert_eq!(snap.duration_ms, snap.length / 80.0 * 1000.0);
        assert!(snap.duration_ms > MIN_VELOCITY_DURATION_MS);
        assert!(snap.duration_ms < MAX_VELOCITY_DURATION_MS);
        assert!(snap.length > 87.4);
    }

    #[test]
    fn velocity_durations_are_clamped_but_fixed_ones_are_not() {
        let (mut engine, _) = engine();
        let fast = engine
            .add(ArcOptions::new(NYC, LONDON).with_velocity(1.0e6), t(0.0))
            .unwrap();
        let slow = engine
            .add(ArcOptions::new(NYC, LONDON).with_velocity(0.001), t(0.0))
            .unwrap();
        let zero = engine
            .add(ArcOptions::new(NYC, LONDON).with_velocity(0.0), t(0.0))
            .unwrap();
        let long = engine
            .add(ArcOptions::new(NYC, LONDON).with_duration(20_000.0), t(0.0))
            .unwrap();
        assert_eq!(engine.arc_snapshot(fast).unwrap().duration_ms, MIN_VELOCITY_DURATION_MS);
        assert_eq!(engine.arc_snapshot(slow).unwrap().duration_ms, MAX_VELOCITY_DURATION_MS);
        assert_eq!(engine.arc_snapshot(zero).unwrap().duration_ms, 2000.0);
        assert_eq!(engine.arc_snapshot(long).unwrap().duration_ms, 20_000.0);
    }

    #[test]
    fn full_lifecycle_with_delays() {
        let (mut engine, tracker) = engine();
        let removed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&removed);
        engine.on_removed(move |id, options| sink.borrow_mut().push((id, options.clone())));

        let options = ArcOptions::new(NYC, LONDON)
            .with_duration(1000.0)
            .with_delays(100.0, 50.0);
        let id = engine.add(options.clone(), t(0.0)).unwrap();
        assert_eq!(tracker.live_geometries(), 5);

        engine.update(t(50.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert_eq!(snap.phase, ArcPhase::Waiting);
        assert!(!snap.tube_visible);
        assert!(!snap.start_point_visible);
        assert_eq!(snap.start_ring.phase, RingPhase::Growing);

        engine.update(t(100.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert_eq!(snap.phase, ArcPhase::Animating);
        assert!(snap.tube_visible);
        assert!(snap.start_point_visible);
        assert_eq!(snap.start_ring.phase, RingPhase::Shrinking);
        assert_eq!(snap.end_ring.phase, RingPhase::Waiting);

        engine.update(t(600.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert_eq!(snap.phase, ArcPhase::Animating);
        assert!(!snap.draw_range.is_empty());
        assert!(!snap.end_revealed);

        engine.update(t(1100.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert_eq!(snap.phase, ArcPhase::Completed);
        assert!(snap.end_revealed);
        assert!(snap.end_point_visible);
        assert_eq!(snap.draw_range, DrawRange::EMPTY);
        assert_eq!(snap.end_ring.phase, RingPhase::Shrinking);

        engine.update(t(1150.0));
        assert!(engine.arc_snapshot(id).is_none());
        assert_eq!(engine.len(), 0);
        assert_eq!(tracker.live_geometries(), 0);
        assert_eq!(tracker.live_materials(), 0);
        assert_eq!(*removed.borrow(), vec![(id, options)]);
    }

    #[test]
    fn one_transition_per_update() {
        let (mut engine, _) = engine();
        let id = engine
            .add(
                ArcOptions::new(NYC, LONDON)
                    .with_duration(0.0)
                    .with_delays(0.0, 0.0),
                t(0.0),
            )
            .unwrap();
        assert_eq!(engine.arc_snapshot(id).unwrap().phase, ArcPhase::Animating);

        engine.update(t(0.0));
        assert_eq!(engine.arc_snapshot(id).unwrap().phase, ArcPhase::Completed);

        engine.update(t(0.0));
        assert!(!engine.contains(id));
    }

    #[test]
    fn end_point_reveals_before_completion() {
        let (mut engine, _) = engine();
        let id = engine
            .add(
                ArcOptions::new(NYC, LONDON)
                    .with_duration(1000.0)
                    .with_flying(false),
                t(0.0),
            )
            .unwrap();
        engine.update(t(940.0));
        assert!(!engine.arc_snapshot(id).unwrap().end_revealed);
        engine.update(t(960.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert_eq!(snap.phase, ArcPhase::Animating);
        assert!(snap.end_revealed);
        assert!(snap.end_point_visible);
        assert_eq!(snap.end_ring.phase, RingPhase::Shrinking);

        engine.update(t(1000.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert_eq!(snap.phase, ArcPhase::Completed);
        assert_eq!(
            snap.draw_range,
            DrawRange::new(0, snap.tubular_segments * snap.index_stride)
        );
    }

    #[test]
    fn draw_window_stays_within_the_tube() {
        let (mut engine, _) = engine();
        let id = engine
            .add(ArcOptions::new(NYC, LONDON).with_duration(1000.0), t(0.0))
            .unwrap();
        for k in 0..100 {
            engine.update(t(k as f64 * 10.0));
            let snap = engine.arc_snapshot(id).unwrap();
            let total = snap.tubular_segments * snap.index_stride;
            assert!(snap.draw_range.end() <= total);
            assert_eq!(snap.draw_range.start % snap.index_stride, 0);
            assert_eq!(snap.draw_range.count % snap.index_stride, 0);
        }
    }

    #[test]
    fn flying_window_only_moves_forward_while_animating() {
        let (mut engine, _) = engine();
        let id = engine
            .add(
                ArcOptions::new(NYC, LONDON)
                    .with_duration(1000.0)
                    .with_flying(true),
                t(0.0),
            )
            .unwrap();
        let mut prev: Option<DrawRange> = None;
        let mut animating_frames = 0;
        for ms in 0..=1000 {
            engine.update(t(ms as f64));
            let snap = engine.arc_snapshot(id).unwrap();
            if snap.phase != ArcPhase::Animating {
                break;
            }
            animating_frames += 1;
            let range = snap.draw_range;
            assert!(range.start <= range.end(), "tail passed head at {ms} ms");
            if let Some(prev) = prev {
                assert!(range.start >= prev.start, "tail moved back at {ms} ms");
                assert!(range.end() >= prev.end(), "head moved back at {ms} ms");
            }
            prev = Some(range);
        }
        assert!(animating_frames > 900);
    }

    #[test]
    fn default_end_delay_lets_the_end_ring_fade_out() {
        let (mut engine, _) = engine();
        let id = engine.add(ArcOptions::new(NYC, LONDON), t(0.0)).unwrap();
        let mut last = engine.arc_snapshot(id).unwrap();
        let mut frame = 0;
        while engine.contains(id) {
            frame += 1;
            assert!(frame < 1000, "arc never removed");
            engine.update(t(frame as f64 * 16.0));
            if let Some(snap) = engine.arc_snapshot(id) {
                last = snap;
            }
        }
        assert_eq!(last.phase, ArcPhase::Completed);
        assert_eq!(last.end_ring.phase, RingPhase::Done);
        assert_eq!(last.start_ring.phase, RingPhase::Done);
    }

    #[test]
    fn remove_by_id_fires_once_and_ids_are_not_reused() {
        let (mut engine, tracker) = engine();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        engine.on_removed(move |_, _| *sink.borrow_mut() += 1);

        let first = engine.add(ArcOptions::new(NYC, LONDON), t(0.0)).unwrap();
        assert!(engine.remove(first));
        assert!(!engine.remove(first));
        assert!(!engine.remove(ArcId(999)));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(tracker.live_geometries(), 0);

        let second = engine.add(ArcOptions::new(NYC, LONDON), t(0.0)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn invalid_options_do_not_consume_ids() {
        let (mut engine, tracker) = engine();
        let mut bad = ArcOptions::new(NYC, LONDON);
        bad.start_lat = f64::INFINITY;
        assert!(matches!(
            engine.add(bad, t(0.0)),
            Err(ArcError::NonFiniteCoordinate { .. })
        ));
        assert_eq!(tracker.live_geometries(), 0);
        let id = engine.add(ArcOptions::new(NYC, LONDON), t(0.0)).unwrap();
        assert_eq!(id, ArcId(1));
    }

    #[test]
    fn clear_releases_everything_without_callbacks() {
        let (mut engine, tracker) = engine();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        engine.on_removed(move |_, _| *sink.borrow_mut() += 1);
        for _ in 0..3 {
            engine.add(ArcOptions::new(NYC, LONDON), t(0.0)).unwrap();
        }
        assert_eq!(engine.len(), 3);
        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(tracker.live_geometries(), 0);
        assert_eq!(tracker.live_materials(), 0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn disabled_markers_create_no_objects() {
        let (mut engine, tracker) = engine();
        let id = engine
            .add(
                ArcOptions::new(NYC, LONDON)
                    .with_points(false, false)
                    .with_rings(false, false),
                t(0.0),
            )
            .unwrap();
        assert_eq!(tracker.live_geometries(), 1);
        engine.update(t(16.0));
        let snap = engine.arc_snapshot(id).unwrap();
        assert!(snap.start_ring.is_done());
        assert!(!snap.start_point_visible);
    }

    #[test]
    fn draws_only_visible_parts() {
        let (mut engine, _) = engine();
        engine
            .add(
                ArcOptions::new(NYC, LONDON)
                    .with_duration(1000.0)
                    .with_delays(500.0, 0.0),
                t(0.0),
            )
            .unwrap();
        engine.add(ArcOptions::new(NYC, LONDON).with_duration(1000.0), t(0.0)).unwrap();
        engine.update(t(300.0));

        let mut frame = RenderFrame::new();
        engine.collect_draws(&mut frame);
        assert_eq!(frame.count(Group::Arcs), 1);
        // start point and start ring of the running arc
        assert_eq!(frame.count(Group::Markers), 2);
    }

    #[test]
    fn dropping_the_engine_releases_resources() {
        let tracker = ResourceTracker::new();
        {
            let mut engine = ArcEngine::new(tracker.clone(), ArcEngineSettings::default());
            engine.add(ArcOptions::new(NYC, LONDON), t(0.0)).unwrap();
            assert!(tracker.live_geometries() > 0);
        }
        assert_eq!(tracker.live_geometries(), 0);
    }
}
