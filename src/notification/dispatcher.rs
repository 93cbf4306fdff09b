/**
* filename : dispatcher
* author : HAMA
* date: 2025. 5. 12.
* description: 알림을 백그라운드 워커로 넘기는 디스패처
**/

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::SignalError;
use super::{Notification, Notifier};

/// 알림 제출 핸들. 복제해서 여러 곳에서 사용할 수 있다.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::UnboundedSender<Notification>,
}

/// 알림 워커 태스크
pub struct DispatchWorker {
    task: JoinHandle<()>,
}

impl NotificationDispatcher {
    /// 워커를 띄우고 제출 핸들을 반환한다. tokio 런타임 안에서 호출해야 한다.
    pub fn spawn(notifier: Arc<dyn Notifier>, timeout: Duration) -> (Self, DispatchWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_worker(receiver, notifier, timeout));
        (NotificationDispatcher { sender }, DispatchWorker { task })
    }

    /// 이미 있는 채널에 연결 (테스트 및 외부 워커용)
    pub fn from_sender(sender: mpsc::UnboundedSender<Notification>) -> Self {
        NotificationDispatcher { sender }
    }

    /// 큐에 넣고 즉시 반환. 전달 결과는 기다리지 않는다.
    pub fn dispatch(&self, notification: Notification) -> Result<(), SignalError> {
        self.sender
            .send(notification)
            .map_err(|_| SignalError::ChannelClosed)
    }
}

impl DispatchWorker {
    /// 모든 핸들이 drop 된 뒤 남은 알림을 처리하고 종료될 때까지 대기
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            log::error!("notification worker terminated abnormally: {}", e);
        }
    }

    pub fn abort(&self) {
        self.task.abort();
    }
}

async fn run_worker(
    mut receiver: mpsc::UnboundedReceiver<Notification>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
) {
    log::info!("notification worker started ({})", notifier.name());

    while let Some(notification) = receiver.recv().await {
        match tokio::time::timeout(timeout, notifier.notify(&notification)).await {
            Ok(Ok(())) => {
                log::debug!("{} notification delivered: {} {}", notifier.name(), notification.symbol, notification.signal);
            }
            Ok(Err(e)) => {
                log::error!("{} notification failed for {}: {}", notifier.name(), notification.symbol, e);
            }
            Err(_) => {
                log::error!(
                    "{} notification timed out after {:?} for {}",
                    notifier.name(),
                    timeout,
                    notification.symbol
                );
            }
        }
    }

    log::info!("notification worker stopped ({})", notifier.name());
}
