//! UseCase: チャットハブ（レジストリ・履歴・ブロードキャスト）
//!
//! ## 概要
//!
//! セッションレジストリと履歴ログを 1 つのロックの内側に置き、
//! 参加・送信・退出の各処理をその臨界区間で実行します。
//!
//! - 参加: 登録、参加通知、履歴の再送を 1 つの臨界区間で行うため、
//!   新規参加者は履歴を全件受け取ってからライブのメッセージを受け取り、
//!   同じレコードを 2 回受け取ることはない
//! - 送信: 履歴への追加と全員への配信を同じ臨界区間で行うため、
//!   全員が同じ順序でメッセージを受け取り、出力が混ざらない
//! - 退出: 冪等。2 回目以降の呼び出しは何も削除せず、通知も送らない
//!
//! ## 既知の制約
//!
//! 配信（ネットワーク書き込み）はロックを保持したまま行うため、
//! 受信しない相手が 1 人いると全体の配信が止まります。

use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use irori_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    Broadcast, HistoryLog, HistoryRecord, MessagePusher, Participant, RoomSnapshot, SessionId,
    SessionRegistry, Timestamp,
};

/// Outbound side of a registered participant
pub type Outlet = Box<dyn MessagePusher>;

/// Per-broadcast delivery outcome
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipients written successfully
    pub delivered: usize,
    /// Recipients whose write failed (swallowed)
    pub failed: usize,
}

/// State guarded by the hub lock
struct HubState {
    registry: SessionRegistry<Outlet>,
    history: HistoryLog,
}

/// Shared aggregate owning the session registry and the history log
pub struct ChatHub {
    /// Registry and history under one lock
    state: Mutex<HubState>,
    /// Source of message timestamps
    clock: Arc<dyn Clock>,
    next_session_id: AtomicU64,
}

impl ChatHub {
    /// Create a hub using the system clock
    pub fn new(history_limit: Option<NonZeroUsize>) -> Self {
        Self::with_clock(Arc::new(SystemClock), history_limit)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, history_limit: Option<NonZeroUsize>) -> Self {
        Self {
            state: Mutex::new(HubState {
                registry: SessionRegistry::new(),
                history: HistoryLog::new(history_limit),
            }),
            clock,
            next_session_id: AtomicU64::new(0),
        }
    }

    /// Hand out the next session id (starting at 1)
    pub fn allocate_session_id(&self) -> SessionId {
        SessionId::new(self.next_session_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now())
    }

    /// 参加者を登録し、参加通知をブロードキャストし、履歴を新規参加者にだけ再送する
    ///
    /// # Returns
    ///
    /// * `true` - 登録した
    /// * `false` - 同じセッション ID が既に登録されていた（何もしない）
    pub async fn join(&self, participant: Participant, outlet: Outlet) -> bool {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let id = participant.id;
        let name = participant.name.clone();
        if !state.registry.register(participant, outlet) {
            tracing::warn!("Session {} is already registered, ignoring join", id);
            return false;
        }

        let notice = self.broadcast_locked(state, Broadcast::joined(&name)).await;
        let replayed = replay_history(state, id).await;
        tracing::debug!(
            "Session {} ('{}') joined: notice delivered to {} (failed {}), replayed {} record(s)",
            id,
            name,
            notice.delivered,
            notice.failed,
            replayed
        );
        true
    }

    /// メッセージを全参加者（送信者を含む）に配信する
    ///
    /// `Attributed` の場合は配信前に履歴へ 1 件だけ追加する。
    /// 個々の参加者への書き込み失敗は握りつぶし、残りの参加者への配信を続ける。
    pub async fn broadcast(&self, message: Broadcast) -> DeliveryReport {
        let mut guard = self.state.lock().await;
        self.broadcast_locked(&mut guard, message).await
    }

    /// 参加者を登録解除し、残りの参加者に退出通知を送り、接続を閉じる
    ///
    /// 登録解除の後に通知を配信するため、途中で future を破棄すると通知は失われる。
    /// 中断され得る呼び出し元は専用のタスクで実行すること。
    ///
    /// # Returns
    ///
    /// * `Some(Participant)` - 登録解除した
    /// * `None` - 既に登録されていない（何もしない、通知も送らない）
    pub async fn leave(&self, id: SessionId) -> Option<Participant> {
        let mut guard = self.state.lock().await;
        let mut entry = guard.registry.deregister(id)?;

        let notice = self
            .broadcast_locked(&mut guard, Broadcast::left(&entry.participant.name))
            .await;
        drop(guard);

        entry.outlet.close().await;
        tracing::debug!(
            "Session {} ('{}') left: notice delivered to {} (failed {})",
            id,
            entry.participant.name,
            notice.delivered,
            notice.failed
        );
        Some(entry.participant)
    }

    /// Consistent copy of participants and history
    pub async fn snapshot(&self) -> RoomSnapshot {
        let state = self.state.lock().await;
        RoomSnapshot {
            participants: state.registry.participants(),
            history: state.history.records(),
        }
    }

    pub async fn participant_count(&self) -> usize {
        self.state.lock().await.registry.len()
    }

    pub async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }

    async fn broadcast_locked(&self, state: &mut HubState, message: Broadcast) -> DeliveryReport {
        let line = match message {
            Broadcast::Attributed { sender, text } => {
                let record = HistoryRecord::new(self.now(), sender.name, text);
                let line = record.render();
                if let Some(evicted) = state.history.append(record) {
                    tracing::debug!(
                        "History limit reached, evicted message from '{}' at {}",
                        evicted.sender,
                        evicted.timestamp
                    );
                }
                line
            }
            Broadcast::SystemNotice { text } => text,
        };
        deliver_to_all(&mut state.registry, &line).await
    }
}

/// Write `line` to every registered participant in registration order
async fn deliver_to_all(registry: &mut SessionRegistry<Outlet>, line: &str) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for entry in registry.iter_mut() {
        match entry.outlet.push(line).await {
            Ok(()) => report.delivered += 1,
            Err(e) => {
                report.failed += 1;
                tracing::debug!(
                    "Failed to deliver to session {} ('{}'): {}",
                    entry.participant.id,
                    entry.participant.name,
                    e
                );
            }
        }
    }
    report
}

/// Send the whole history to one participant, oldest first
async fn replay_history(state: &mut HubState, id: SessionId) -> usize {
    let HubState { registry, history } = state;
    let Some(entry) = registry.get_mut(id) else {
        return 0;
    };

    let mut replayed = 0;
    for record in history.iter() {
        if let Err(e) = entry.outlet.push(&record.render()).await {
            tracing::debug!("History replay to session {} stopped: {}", id, e);
            break;
        }
        replayed += 1;
    }
    replayed
}
