//=========================================================================
// Test Doubles
//=========================================================================
//
// Scriptable scenes and in-memory service fakes shared by unit tests.
//
//   Journal   → ordered record of lifecycle calls ("Title:load", ...)
//   TestScene → scene whose failures are switched on per test
//   LoadGate  → holds a scene's load pending until opened
//   Fake*     → content/audio collaborators with no backing store
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::future::poll_fn;
use std::rc::Rc;
use std::task::Poll;

use anyhow::bail;
use async_trait::async_trait;

//=== Internal Dependencies ===============================================

use crate::core::input::InputService;
use crate::core::logger::Logger;
use crate::core::scene::{Scene, SceneBase, SceneCommands, SceneContext, SceneStack};
use crate::core::services::{
    AudioClip, AudioService, CancellationToken, ContentError, ContentLoader, Font,
    PlaybackInstance, PlaybackOptions, Services, Texture,
};
use crate::core::surface::DrawSurface;
use crate::core::time::SimTime;

//=== Journal =============================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    entries: Rc<RefCell<Vec<String>>>,
}

impl Journal {
    pub(crate) fn record(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub(crate) fn contains(&self, entry: &str) -> bool {
        self.entries.borrow().iter().any(|e| e == entry)
    }

    pub(crate) fn count(&self, entry: &str) -> usize {
        self.entries.borrow().iter().filter(|e| *e == entry).count()
    }

    pub(crate) fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

//=== LoadGate ============================================================

/// Shared switch that keeps waiting loads pending until opened.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadGate {
    open: Rc<Cell<bool>>,
}

impl LoadGate {
    pub(crate) fn open(&self) {
        self.open.set(true);
    }

    async fn wait(&self) {
        poll_fn(|_| {
            if self.open.get() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        })
        .await
    }
}

//=== TestScene ===========================================================

type UpdateHook = Box<dyn FnMut(&SceneCommands)>;

/// Scene that journals every lifecycle call as `"<name>:<call>"`.
pub(crate) struct TestScene {
    base: SceneBase,
    journal: Journal,
    load_failures: Cell<u32>,
    fail_initialize: bool,
    fail_update: bool,
    fail_draw: bool,
    fail_unload: bool,
    panic_unload: bool,
    panic_drop: bool,
    on_update: Option<UpdateHook>,
    gate: Option<LoadGate>,
    cancel_on_load: Option<CancellationToken>,
    texture: Option<Rc<dyn Texture>>,
}

impl TestScene {
    pub(crate) fn new(name: &str, journal: &Journal) -> Self {
        Self {
            base: SceneBase::new(name).unwrap(),
            journal: journal.clone(),
            load_failures: Cell::new(0),
            fail_initialize: false,
            fail_update: false,
            fail_draw: false,
            fail_unload: false,
            panic_unload: false,
            panic_drop: false,
            on_update: None,
            gate: None,
            cancel_on_load: None,
            texture: None,
        }
    }

    pub(crate) fn boxed(name: &str, journal: &Journal) -> Box<dyn Scene> {
        Box::new(Self::new(name, journal))
    }

    //--- Scripting --------------------------------------------------------

    /// The next `times` loads fail before one succeeds.
    pub(crate) fn failing_load(self, times: u32) -> Self {
        self.load_failures.set(times);
        self
    }

    pub(crate) fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    pub(crate) fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub(crate) fn failing_draw(mut self) -> Self {
        self.fail_draw = true;
        self
    }

    pub(crate) fn failing_unload(mut self) -> Self {
        self.fail_unload = true;
        self
    }

    pub(crate) fn panicking_unload(mut self) -> Self {
        self.panic_unload = true;
        self
    }

    pub(crate) fn panicking_drop(mut self) -> Self {
        self.panic_drop = true;
        self
    }

    /// Loads stay pending until `gate` opens.
    pub(crate) fn waiting_on(mut self, gate: &LoadGate) -> Self {
        self.gate = Some(gate.clone());
        self
    }

    /// The first load cancels `token` midway and then observes it.
    pub(crate) fn cancelling_load(mut self, token: &CancellationToken) -> Self {
        self.cancel_on_load = Some(token.clone());
        self
    }

    /// Runs `hook` with the scene's command handle on every loaded update.
    pub(crate) fn on_update(mut self, hook: impl FnMut(&SceneCommands) + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    fn record(&self, call: &str) {
        self.journal.record(format!("{}:{}", self.base.name(), call));
    }

    async fn acquire(&mut self, cancel: &CancellationToken) -> anyhow::Result<()> {
        let remaining = self.load_failures.get();
        if remaining > 0 {
            self.load_failures.set(remaining - 1);
            bail!("scripted load failure");
        }

        if let Some(gate) = self.gate.clone() {
            gate.wait().await;
        }
        if let Some(token) = self.cancel_on_load.take() {
            token.cancel();
            token.check()?;
        }

        let content = self.base.content()?;
        let path = format!("{}.png", self.base.name());
        self.texture = Some(content.load_texture(&path, cancel).await?);
        Ok(())
    }
}

#[async_trait(?Send)]
impl Scene for TestScene {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn is_loaded(&self) -> bool {
        self.base.is_loaded()
    }

    fn attach(&mut self, context: SceneContext) {
        self.base.attach(context);
    }

    fn initialize(&mut self) -> anyhow::Result<()> {
        self.record("initialize");
        if self.fail_initialize {
            bail!("scripted initialize failure");
        }
        self.base.mark_initialized();
        Ok(())
    }

    async fn load(&mut self, cancel: &CancellationToken) -> anyhow::Result<()> {
        self.record("load");
        self.base.begin_load();
        let result = self.acquire(cancel).await;
        self.base.finish_load(result)
    }

    fn update(&mut self, _time: &SimTime) -> anyhow::Result<()> {
        if !self.base.is_loaded() {
            return Ok(());
        }
        self.record("update");
        if self.fail_update {
            bail!("scripted update failure");
        }
        if let Some(hook) = self.on_update.as_mut() {
            hook(self.base.commands()?);
        }
        Ok(())
    }

    fn draw(&mut self, _surface: &mut DrawSurface<'_>) -> anyhow::Result<()> {
        if !self.base.is_loaded() {
            return Ok(());
        }
        self.record("draw");
        if self.fail_draw {
            bail!("scripted draw failure");
        }
        Ok(())
    }

    fn unload(&mut self) -> anyhow::Result<()> {
        self.record("unload");
        self.base.mark_unloaded();
        self.texture = None;
        if self.panic_unload {
            panic!("unload exploded");
        }
        if self.fail_unload {
            bail!("scripted unload failure");
        }
        Ok(())
    }
}

impl Drop for TestScene {
    fn drop(&mut self) {
        self.record("drop");
        if self.panic_drop {
            panic!("drop exploded");
        }
    }
}

//=== Content Fakes =======================================================

#[derive(Debug)]
pub(crate) struct FakeTexture {
    pub width: u32,
    pub height: u32,
}

impl Texture for FakeTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub(crate) struct FakeFont(String);

impl Font for FakeFont {
    fn name(&self) -> &str {
        &self.0
    }
}

/// Serves any path except those under `missing/`.
#[derive(Debug, Default)]
pub(crate) struct FakeContent {
    requests: RefCell<Vec<String>>,
}

impl FakeContent {
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn lookup(&self, path: &str, cancel: &CancellationToken) -> Result<(), ContentError> {
        cancel.check()?;
        self.requests.borrow_mut().push(path.to_owned());
        if path.starts_with("missing/") {
            return Err(ContentError::NotFound(path.to_owned()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ContentLoader for FakeContent {
    async fn load_texture(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Rc<dyn Texture>, ContentError> {
        self.lookup(path, cancel)?;
        Ok(Rc::new(FakeTexture { width: 32, height: 32 }))
    }

    async fn load_font(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Rc<dyn Font>, ContentError> {
        self.lookup(path, cancel)?;
        Ok(Rc::new(FakeFont(path.to_owned())))
    }
}

//=== Audio Fakes =========================================================

#[derive(Debug)]
pub(crate) struct FakeClip;

impl AudioClip for FakeClip {
    fn duration_seconds(&self) -> Option<f64> {
        Some(1.5)
    }
}

#[derive(Debug)]
pub(crate) struct FakeInstance {
    volume: f32,
    looping: bool,
    playing: bool,
}

impl PlaybackInstance for FakeInstance {
    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn is_looping(&self) -> bool {
        self.looping
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeAudio;

#[async_trait(?Send)]
impl AudioService for FakeAudio {
    async fn load_clip(
        &self,
        _path: &str,
        cancel: &CancellationToken,
    ) -> Result<Rc<dyn AudioClip>, ContentError> {
        cancel.check()?;
        Ok(Rc::new(FakeClip))
    }

    fn play(&self, _clip: &Rc<dyn AudioClip>, options: PlaybackOptions) -> Box<dyn PlaybackInstance> {
        Box::new(FakeInstance {
            volume: options.volume(),
            looping: options.looping,
            playing: options.auto_start,
        })
    }
}

//=== Helpers =============================================================

pub(crate) fn test_services() -> Services {
    Services::new(
        Rc::new(FakeContent::default()),
        Rc::new(FakeAudio),
        Rc::new(InputService::default()),
    )
}

/// A stack with fake services attached and a null logger.
pub(crate) fn ready_stack() -> SceneStack {
    let mut stack = SceneStack::new(Logger::null());
    stack.attach_services(test_services());
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_audio_honours_options() {
        let audio = FakeAudio;
        let clip: Rc<dyn AudioClip> = Rc::new(FakeClip);
        let mut instance = audio.play(&clip, PlaybackOptions::new().with_volume(0.5).looping(true));

        assert_eq!(instance.volume(), 0.5);
        assert!(instance.is_looping());
        assert!(instance.is_playing());

        instance.pause();
        assert!(!instance.is_playing());
    }

    #[test]
    fn fake_content_rejects_missing_and_cancelled() {
        let content = FakeContent::default();
        let cancel = CancellationToken::new();

        let missing = pollster::block_on(content.load_texture("missing/a.png", &cancel));
        assert!(matches!(missing, Err(ContentError::NotFound(_))));

        cancel.cancel();
        let cancelled = pollster::block_on(content.load_font("ui.ttf", &cancel));
        assert!(matches!(cancelled, Err(ContentError::Cancelled)));
        assert_eq!(content.requests(), vec!["missing/a.png"]);
    }
}
