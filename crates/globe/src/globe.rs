//! Host-facing facade tying configuration, land, and arcs together.

use std::sync::Arc;
use std::time::Duration;

use foundation::time::Time;
use layers::arcs::{ArcEngine, ArcId, ArcOptions, ArcSnapshot};
use layers::hex::HexTessellation;
use runtime::{Clock, Frame, FrameTicker, SystemClock};
use scene::draw::{Group, RenderFrame};
use scene::light::{Light, default_lights};
use scene::material::Material;
use scene::object::SceneObject;
use scene::prefabs::globe::{atmosphere_shell, globe_body};
use scene::resources::ResourceTracker;
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigChanges, GlobeConfig, GlobeConfigPatch};
use crate::error::GlobeError;
use crate::land::{LandError, LandLoader, LandSource};

/// Counts from the last installed land tessellation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LandStats {
    pub cells: usize,
    pub patches: usize,
    pub skipped_cells: usize,
    pub skipped_polygons: usize,
}

pub struct Globe {
    config: GlobeConfig,
    clock: Box<dyn Clock>,
    ticker: FrameTicker,
    tracker: ResourceTracker,
    body: SceneObject,
    atmosphere: Option<SceneObject>,
    land: Option<SceneObject>,
    land_stats: Option<LandStats>,
    land_source: Option<Arc<dyn LandSource>>,
    loader: LandLoader,
    arcs: ArcEngine,
    lights: Vec<Light>,
    disposed: bool,
}

impl std::fmt::Debug for Globe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Globe")
            .field("config", &self.config)
            .field("arcs", &self.arcs)
            .field("land", &self.land_stats)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl Globe {
    pub fn new(config: GlobeConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn from_patch(patch: GlobeConfigPatch) -> Self {
        Self::new(GlobeConfig::merged(patch))
    }

    pub fn with_clock(config: GlobeConfig, clock: Box<dyn Clock>) -> Self {
        let tracker = ResourceTracker::new();
        let mut material = Material::new(&tracker, config.globe_color());
        style_body(&mut material, &config);
        let body = globe_body(&tracker, config.radius, material);
        let atmosphere = build_atmosphere(&tracker, &config);
        let arcs = ArcEngine::new(tracker.clone(), config.arc_settings());
        info!(radius = config.radius, "globe created");

        Self {
            config,
            clock,
            ticker: FrameTicker::new(),
            tracker,
            body,
            atmosphere,
            land: None,
            land_stats: None,
            land_source: None,
            loader: LandLoader::new(),
            arcs,
            lights: default_lights(),
            disposed: false,
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn tracker(&self) -> &ResourceTracker {
        &self.tracker
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.ticker.last()
    }

    /// Start loading and tessellating land in the background with the
    /// current tessellation parameters. Failures are logged from
    /// [`Globe::update`] and leave the globe without land.
    pub fn load_land(&mut self, source: Arc<dyn LandSource>) -> Result<(), GlobeError> {
        self.ensure_live()?;
        self.land_source = Some(source);
        self.start_land_load();
        Ok(())
    }

    /// Re-run tessellation from the last land source with the current
    /// parameters. Returns false when no source was ever given.
    pub fn rebuild_land(&mut self) -> Result<bool, GlobeError> {
        self.ensure_live()?;
        if self.land_source.is_none() {
            return Ok(false);
        }
        self.start_land_load();
        Ok(true)
    }

    pub fn is_land_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn land_stats(&self) -> Option<LandStats> {
        self.land_stats
    }

    /// Block up to `timeout` for a pending land load and install it.
    /// Returns whether a result (success or failure) was handled.
    pub fn wait_for_land(&mut self, timeout: Duration) -> bool {
        match self.loader.wait(timeout) {
            Some(result) => {
                self.handle_land(result);
                true
            }
            None => false,
        }
    }

    pub fn add_arc(&mut self, options: ArcOptions) -> Result<ArcId, GlobeError> {
        self.ensure_live()?;
        let now = self.clock.now();
        Ok(self.arcs.add(options, now)?)
    }

    pub fn remove_arc_by_id(&mut self, id: ArcId) -> bool {
        !self.disposed && self.arcs.remove(id)
    }

    /// Remove every arc. Removal callbacks are not fired.
    pub fn clear_all_arcs(&mut self) {
        self.arcs.clear();
    }

    pub fn active_arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Register the removal callback, replacing any previous one.
    pub fn on_arc_removed(&mut self, callback: impl FnMut(ArcId, &ArcOptions) + 'static) {
        self.arcs.on_removed(callback);
    }

    pub fn arc_snapshot(&self, id: ArcId) -> Option<ArcSnapshot> {
        self.arcs.arc_snapshot(id)
    }

    /// Advance one frame: pick up finished land work, then animate arcs.
    pub fn update(&mut self) {
        if self.disposed {
            return;
        }
        let frame = self.ticker.tick(self.clock.as_ref());
        if let Some(result) = self.loader.poll() {
            self.handle_land(result);
        }
        self.arcs.update(frame.time);
        trace!(frame = frame.index, dt_ms = frame.dt_ms, "globe updated");
    }

    /// Merge `patch` into the configuration and apply what can be applied
    /// without rebuilding land. Radius changes are rejected.
    pub fn update_config(&mut self, patch: GlobeConfigPatch) -> ConfigChanges {
        if self.disposed {
            return ConfigChanges::default();
        }
        let radius = self.config.radius;
        let changes = self.config.apply(patch);

        if changes.radius {
            warn!(
                requested = self.config.radius,
                kept = radius,
                "radius can only be set at construction"
            );
            self.config.radius = radius;
        }
        if changes.material {
            let color = self.config.globe_color();
            self.body.material.color = color;
            style_body(&mut self.body.material, &self.config);
        }
        if changes.polygon_color
            && let Some(land) = self.land.as_mut()
        {
            land.material.set_color_with_alpha(self.config.polygon_color());
        }
        if changes.atmosphere {
            if let Some(mut old) = self.atmosphere.take() {
                old.dispose();
            }
            self.atmosphere = build_atmosphere(&self.tracker, &self.config);
        }
        if changes.rings {
            let settings = self.arcs.settings_mut();
            let radius = settings.radius;
            *settings = self.config.arc_settings();
            settings.radius = radius;
        }
        if changes.land_structure {
            debug!("tessellation parameters stored; applied on rebuild_land");
        }
        changes
    }

    /// Draw list for the current state, in group order.
    pub fn render_frame(&self) -> RenderFrame<'_> {
        let mut frame = RenderFrame::new();
        if self.disposed {
            return frame;
        }
        frame.push(Group::Globe, &self.body);
        if let Some(land) = &self.land {
            frame.push(Group::Polygons, land);
        }
        self.arcs.collect_draws(&mut frame);
        if let Some(atmosphere) = &self.atmosphere {
            frame.push(Group::Atmosphere, atmosphere);
        }
        frame.lights = self.lights.clone();
        frame.finish()
    }

    /// Release every owned resource. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.loader.cancel() {
            info!("globe disposed while land was loading; result will be dropped");
        }
        self.arcs.clear();
        self.body.dispose();
        for object in [&mut self.atmosphere, &mut self.land].into_iter().flatten() {
            object.dispose();
        }
        self.atmosphere = None;
        self.land = None;
        self.land_source = None;
        self.disposed = true;
        debug!(
            geometries = self.tracker.live_geometries(),
            materials = self.tracker.live_materials(),
            "globe disposed"
        );
    }

    fn ensure_live(&self) -> Result<(), GlobeError> {
        if self.disposed {
            Err(GlobeError::Disposed)
        } else {
            Ok(())
        }
    }

    fn start_land_load(&mut self) {
        let Some(source) = self.land_source.clone() else {
            return;
        };
        if let Err(err) = self.loader.start(source, self.config.hex_params()) {
            warn!(%err, "land loading unavailable");
        }
    }

    fn handle_land(&mut self, result: Result<HexTessellation, LandError>) {
        match result {
            Ok(tessellation) => self.install_land(tessellation),
            Err(err) => warn!(%err, "continuing without land"),
        }
    }

    fn install_land(&mut self, tessellation: HexTessellation) {
        if let Some(mut old) = self.land.take() {
            old.dispose();
        }
        self.land_stats = Some(LandStats {
            cells: tessellation.cell_count,
            patches: tessellation.patch_count,
            skipped_cells: tessellation.skipped_cells,
            skipped_polygons: tessellation.skipped_polygons,
        });
        let Some(mesh) = tessellation.mesh else {
            warn!("land produced no patches");
            return;
        };
        let mut material = Material::new(&self.tracker, self.config.polygon_color()).double_sided();
        material.set_color_with_alpha(self.config.polygon_color());
        self.land = Some(SceneObject::new(&self.tracker, "land", mesh, material));
    }

    /// Current time on the globe's clock.
    pub fn now(&self) -> Time {
        self.clock.now()
    }
}

impl Drop for Globe {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn style_body(material: &mut Material, config: &GlobeConfig) {
    material.set_opacity(config.globe_opacity);
    material.transparent = config.globe_opacity < 1.0;
    material.shininess = config.shininess;
    material.emissive = config.emissive_color();
    material.emissive_intensity = config.emissive_intensity;
}

fn build_atmosphere(tracker: &ResourceTracker, config: &GlobeConfig) -> Option<SceneObject> {
    config.show_atmosphere.then(|| {
        atmosphere_shell(
            tracker,
            config.radius,
            config.atmosphere_altitude,
            config.atmosphere_color(),
        )
    })
}
