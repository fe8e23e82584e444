// Replay service - Steps the cutoff through the timeline and streams each frame
use crate::application::simulation_service::SimulationService;
use crate::domain::dashboard::Dashboard;
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayMessage {
    Frame {
        index: usize,
        total: usize,
        dashboard: Box<Dashboard>,
    },
    Complete {
        frames: usize,
        duration_ms: u64,
    },
    Error {
        message: String,
    },
}

#[derive(Clone)]
pub struct ReplayService {
    simulation: SimulationService,
}

impl ReplayService {
    pub fn new(simulation: SimulationService) -> Self {
        Self { simulation }
    }

    pub fn stream_replay(&self, interval: Duration) -> mpsc::Receiver<ReplayMessage> {
        let (tx, rx) = mpsc::channel(16);
        let simulation = self.simulation.clone();
        let start_time = Instant::now();

        tokio::spawn(async move {
            let timeline = simulation.timeline();
            let total = timeline.len();

            for (index, cutoff) in timeline.into_iter().enumerate() {
                let msg = match simulation.dashboard_at(Some(cutoff)) {
                    Ok(dashboard) => ReplayMessage::Frame {
                        index,
                        total,
                        dashboard: Box::new(dashboard),
                    },
                    Err(e) => {
                        tracing::error!("Replay stopped at {}: {}", cutoff, e);
                        let _ = tx
                            .send(ReplayMessage::Error {
                                message: e.to_string(),
                            })
                            .await;
                        return;
                    }
                };

                if tx.send(msg).await.is_err() {
                    tracing::debug!("Replay client went away after {} frames", index);
                    return;
                }

                if !interval.is_zero() && index + 1 < total {
                    tokio::time::sleep(interval).await;
                }
            }

            let complete = ReplayMessage::Complete {
                frames: total,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }
}
