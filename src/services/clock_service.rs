//! Reloj del dashboard
//!
//! Tarea periódica que publica la hora actual en un canal `watch`. El reloj
//! es un recurso con dueño: `stop()` o el `Drop` abortan la tarea, así que
//! no queda ningún timer vivo cuando se desmonta la vista/servidor.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

pub struct DisplayClock {
    receiver: watch::Receiver<DateTime<Utc>>,
    handle: JoinHandle<()>,
    period: Duration,
}

impl DisplayClock {
    /// Arrancar el reloj; requiere un runtime de tokio activo
    pub fn start(period: Duration) -> Self {
        let (sender, receiver) = watch::channel(Utc::now());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if sender.send(Utc::now()).is_err() {
                    debug!("🕐 Reloj sin receptores, terminando");
                    break;
                }
            }
        });

        info!("🕐 Reloj del dashboard iniciado (cada {:?})", period);
        Self {
            receiver,
            handle,
            period,
        }
    }

    /// Última hora publicada
    pub fn now(&self) -> DateTime<Utc> {
        *self.receiver.borrow()
    }

    /// Receptor para observar cada tick
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.receiver.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Detener el reloj (idempotente)
    pub fn stop(&self) {
        if !self.handle.is_finished() {
            self.handle.abort();
            info!("🕐 Reloj del dashboard detenido");
        }
    }
}

impl Drop for DisplayClock {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
