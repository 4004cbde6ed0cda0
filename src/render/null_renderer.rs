use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::core::{NormalizedSeries, RendererFamily};
use crate::error::MinichartResult;
use crate::render::{
    ChartRenderer, OverlayContainer, Placement, RenderOptions, RendererFactory,
};

/// Counters shared by a `NullRendererFactory` and every renderer it built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullRenderStats {
    pub constructed: usize,
    pub updates: usize,
    /// Instance id (1-based construction order) of the renderer last drawn.
    pub last_instance: Option<usize>,
    pub last_family: Option<RendererFamily>,
    pub last_values: Vec<f64>,
    pub last_options: Option<RenderOptions>,
}

impl NullRenderStats {
    fn record(
        &mut self,
        instance: usize,
        family: RendererFamily,
        data: &NormalizedSeries,
        options: &RenderOptions,
    ) {
        self.last_instance = Some(instance);
        self.last_family = Some(family);
        self.last_values.clone_from(&data.values);
        self.last_options = Some(options.clone());
    }
}

/// No-op renderer used by tests and headless hosts.
///
/// It still validates render options so tests catch misaligned colors or
/// labels before a real backend is involved.
#[derive(Debug)]
pub struct NullRenderer {
    instance: usize,
    family: RendererFamily,
    stats: Rc<RefCell<NullRenderStats>>,
}

impl NullRenderer {
    #[must_use]
    pub fn instance(&self) -> usize {
        self.instance
    }
}

impl ChartRenderer for NullRenderer {
    fn family(&self) -> RendererFamily {
        self.family
    }

    fn update(&mut self, data: &NormalizedSeries, options: &RenderOptions) -> MinichartResult<()> {
        options.validate(data)?;
        let mut stats = self.stats.borrow_mut();
        stats.updates += 1;
        stats.record(self.instance, self.family, data, options);
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct NullRendererFactory {
    stats: Rc<RefCell<NullRenderStats>>,
}

impl NullRendererFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> NullRenderStats {
        self.stats.borrow().clone()
    }
}

impl RendererFactory for NullRendererFactory {
    type Container = NullContainer;

    fn construct(
        &mut self,
        family: RendererFamily,
        container: &mut NullContainer,
        data: &NormalizedSeries,
        options: &RenderOptions,
    ) -> MinichartResult<Box<dyn ChartRenderer>> {
        options.validate(data)?;
        let instance = {
            let mut stats = self.stats.borrow_mut();
            stats.constructed += 1;
            let instance = stats.constructed;
            stats.record(instance, family, data, options);
            instance
        };
        container.children += 1;
        Ok(Box::new(NullRenderer {
            instance,
            family,
            stats: Rc::clone(&self.stats),
        }))
    }
}

/// Container that records what was done to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NullContainer {
    pub clears: usize,
    /// Number of renderers currently mounted.
    pub children: usize,
    pub transitions: Vec<(Placement, Duration)>,
}

impl NullContainer {
    #[must_use]
    pub fn last_placement(&self) -> Option<Placement> {
        self.transitions.last().map(|(placement, _)| *placement)
    }
}

impl OverlayContainer for NullContainer {
    fn clear(&mut self) {
        self.clears += 1;
        self.children = 0;
    }

    fn transition_to(&mut self, placement: Placement, duration: Duration) {
        self.transitions.push((placement, duration));
    }
}
