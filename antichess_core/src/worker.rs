use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{AiMove, Difficulty, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone)]
pub enum Input {
    ComputeMove {
        board: Board,
        ai_color: Color,
        difficulty: Difficulty,
        config: EngineConfig,
    },
}

/// Exactly one output is sent back per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    MoveFound(AiMove, SearchStats),
    NoMove,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("AI worker thread has stopped")]
    Disconnected,
    #[error("failed to start AI worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// The engine side of the worker; owns the search state between requests.
struct GameWorker {
    engine: Option<AlphaBetaEngine>,
    seed: Option<u64>,
}

impl GameWorker {
    const fn new(seed: Option<u64>) -> Self {
        Self { engine: None, seed }
    }

    fn received(&mut self, msg: Input) -> Output {
        match msg {
            Input::ComputeMove {
                board,
                ai_color,
                difficulty,
                config,
            } => {
                let config = Arc::new(config);
                let engine = match self.engine.take() {
                    Some(mut engine) => {
                        engine.update_config(config);
                        engine
                    }
                    None => match self.seed {
                        Some(seed) => AlphaBetaEngine::with_seed(config, seed),
                        None => AlphaBetaEngine::new(config),
                    },
                };
                let engine = self.engine.insert(engine);

                let limit = difficulty.limit(engine.config());
                match engine.search(&board, ai_color, limit) {
                    Some((mv, stats)) => Output::MoveFound(mv, stats),
                    None => Output::NoMove,
                }
            }
        }
    }
}

/// Runs searches on a background thread so the caller never blocks on one.
pub struct AiWorker {
    input: Option<Sender<Input>>,
    output: Receiver<Output>,
    handle: Option<JoinHandle<()>>,
}

impl AiWorker {
    pub fn spawn() -> Result<Self, WorkerError> {
        Self::start(None)
    }

    /// Worker whose easy tier replays the same random choices for the same seed.
    pub fn spawn_seeded(seed: u64) -> Result<Self, WorkerError> {
        Self::start(Some(seed))
    }

    fn start(seed: Option<u64>) -> Result<Self, WorkerError> {
        let (input_tx, input_rx) = unbounded::<Input>();
        let (output_tx, output_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("antichess-ai".to_string())
            .spawn(move || {
                let mut worker = GameWorker::new(seed);
                for msg in input_rx {
                    if output_tx.send(worker.received(msg)).is_err() {
                        break;
                    }
                }
                log::debug!("AI worker stopped");
            })?;

        Ok(Self {
            input: Some(input_tx),
            output: output_rx,
            handle: Some(handle),
        })
    }

    pub fn request(&self, input: Input) -> Result<(), WorkerError> {
        let sender = self.input.as_ref().ok_or(WorkerError::Disconnected)?;
        sender.send(input).map_err(|_| {
            log::warn!("AI worker rejected a request");
            WorkerError::Disconnected
        })
    }

    pub fn compute_move(
        &self,
        board: Board,
        ai_color: Color,
        difficulty: Difficulty,
        config: EngineConfig,
    ) -> Result<(), WorkerError> {
        self.request(Input::ComputeMove {
            board,
            ai_color,
            difficulty,
            config,
        })
    }

    /// Blocks until the next result arrives.
    pub fn recv(&self) -> Result<Output, WorkerError> {
        self.output.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// The next result if one is ready.
    pub fn try_recv(&self) -> Result<Option<Output>, WorkerError> {
        match self.output.try_recv() {
            Ok(output) => Ok(Some(output)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }
}

impl Drop for AiWorker {
    fn drop(&mut self) {
        self.input.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
