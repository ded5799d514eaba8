// Test doubles for the gateway and player
//
// Both write every call into a shared log so tests can assert on ordering.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use voice_recorder::gateway::GatewayResult;
use voice_recorder::{
    AudioGateway, CaptureSettings, GatewayError, Player, PlayerError, PlayerHandle,
    SessionConfig, SessionController, SessionSnapshot, SoundList,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Prepare {
        file_name: String,
        settings: CaptureSettings,
    },
    Start,
    Pause,
    Stop,
    Delete(PathBuf),
    List,
    /// `recordings` is the catalog size the presentation layer saw at load time
    Load {
        path: PathBuf,
        recordings: Option<usize>,
    },
    Play(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Prepare,
    Start,
    Pause,
    Stop,
    Delete,
    List,
    Load,
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(Instant, Call)>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push((Instant::now(), call));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    /// Calls with the instant each one was made
    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Shared knobs: what the gateway lists and which operations fail
#[derive(Clone, Default)]
pub struct Script(Arc<Mutex<ScriptState>>);

#[derive(Default)]
struct ScriptState {
    listing: Vec<String>,
    failing: Vec<Op>,
}

impl Script {
    pub fn set_listing(&self, names: &[&str]) {
        self.0.lock().unwrap().listing = names.iter().map(|n| n.to_string()).collect();
    }

    pub fn fail(&self, op: Op) {
        self.0.lock().unwrap().failing.push(op);
    }

    pub fn succeed(&self, op: Op) {
        self.0.lock().unwrap().failing.retain(|o| *o != op);
    }

    fn check(&self, op: Op) -> GatewayResult<()> {
        if self.0.lock().unwrap().failing.contains(&op) {
            return Err(GatewayError::new("E_TEST", format!("{:?} failed", op)));
        }
        Ok(())
    }
}

pub struct FakeGateway {
    base: PathBuf,
    log: CallLog,
    script: Script,
    prepared: Option<PathBuf>,
}

#[async_trait::async_trait]
impl AudioGateway for FakeGateway {
    async fn prepare_recording_at_path(
        &mut self,
        file_name: &str,
        settings: &CaptureSettings,
    ) -> GatewayResult<()> {
        self.log.push(Call::Prepare {
            file_name: file_name.to_string(),
            settings: settings.clone(),
        });
        self.script.check(Op::Prepare)?;
        self.prepared = Some(self.base.join(file_name));
        Ok(())
    }

    async fn start_recording(&mut self) -> GatewayResult<PathBuf> {
        self.log.push(Call::Start);
        self.script.check(Op::Start)?;
        self.prepared
            .clone()
            .ok_or_else(|| GatewayError::message("not prepared"))
    }

    async fn pause_recording(&mut self) -> GatewayResult<PathBuf> {
        self.log.push(Call::Pause);
        self.script.check(Op::Pause)?;
        self.prepared
            .clone()
            .ok_or_else(|| GatewayError::message("not prepared"))
    }

    async fn stop_recording(&mut self) -> GatewayResult<PathBuf> {
        self.log.push(Call::Stop);
        self.script.check(Op::Stop)?;
        self.prepared
            .take()
            .ok_or_else(|| GatewayError::message("not prepared"))
    }

    async fn delete_sound(&mut self, path: &Path) -> GatewayResult<()> {
        self.log.push(Call::Delete(path.to_path_buf()));
        self.script.check(Op::Delete)
    }

    async fn sound_list(&self) -> GatewayResult<SoundList> {
        self.log.push(Call::List);
        self.script.check(Op::List)?;
        Ok(SoundList {
            sound_list_response: self.script.0.lock().unwrap().listing.clone(),
        })
    }

    fn base_directory(&self) -> &Path {
        &self.base
    }
}

pub struct FakePlayer {
    log: CallLog,
    script: Script,
    observer: Arc<Mutex<Option<watch::Receiver<SessionSnapshot>>>>,
}

#[async_trait::async_trait]
impl Player for FakePlayer {
    async fn load(&self, path: &Path, _format: &str) -> Result<Box<dyn PlayerHandle>, PlayerError> {
        let recordings = self
            .observer
            .lock()
            .unwrap()
            .as_ref()
            .map(|rx| rx.borrow().recordings.len());
        self.log.push(Call::Load {
            path: path.to_path_buf(),
            recordings,
        });

        if self.script.check(Op::Load).is_err() {
            return Err(PlayerError::Load {
                path: path.display().to_string(),
                reason: "unreadable".to_string(),
            });
        }

        Ok(Box::new(FakeHandle {
            log: self.log.clone(),
            path: path.to_path_buf(),
        }))
    }
}

struct FakeHandle {
    log: CallLog,
    path: PathBuf,
}

#[async_trait::async_trait]
impl PlayerHandle for FakeHandle {
    async fn play(self: Box<Self>) -> Result<(), PlayerError> {
        self.log.push(Call::Play(self.path.clone()));
        Ok(())
    }
}

pub struct Harness {
    pub controller: SessionController,
    pub log: CallLog,
    pub script: Script,
}

pub fn no_delays() -> SessionConfig {
    SessionConfig {
        load_delay: Duration::ZERO,
        play_delay: Duration::ZERO,
    }
}

/// Controller over fake collaborators rooted at `base`
pub fn harness(base: &str, config: SessionConfig) -> Harness {
    let log = CallLog::default();
    let script = Script::default();
    let observer = Arc::new(Mutex::new(None));

    let gateway = FakeGateway {
        base: PathBuf::from(base),
        log: log.clone(),
        script: script.clone(),
        prepared: None,
    };
    let player = FakePlayer {
        log: log.clone(),
        script: script.clone(),
        observer: Arc::clone(&observer),
    };

    let controller = SessionController::new(Box::new(gateway), Box::new(player), config);
    *observer.lock().unwrap() = Some(controller.subscribe());

    Harness {
        controller,
        log,
        script,
    }
}
