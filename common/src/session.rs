//! アップロードセッション
//!
//! ロールごとのアップロード状態と、比較ボタンの有効化判定を持つ。
//! 同じロールでファイルを選び直したときは、最後に選ばれたファイルが
//! そのロールの最終結果を決める。デコードの完了順やアップロードの
//! 応答順が入れ替わっても、古い選択・古いアップロードは捨てられる。

use crate::error::WidgetError;
use crate::role::Role;
use std::collections::BTreeMap;

/// ロール枠の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Rendering,
    Uploading,
    Uploaded,
    UploadFailed,
}

impl SlotState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotState::Empty => "empty",
            SlotState::Rendering => "rendering",
            SlotState::Uploading => "uploading",
            SlotState::Uploaded => "uploaded",
            SlotState::UploadFailed => "failed",
        }
    }
}

/// ファイル選択1回分の受付番号（デコード前に発行する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionTicket {
    role: Role,
    seq: u64,
}

impl SelectionTicket {
    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// アップロード1回分の受付番号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    role: Role,
    seq: u64,
}

impl UploadTicket {
    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// 結果を反映したかどうか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Slot {
    state: SlotState,
    latest_selection: u64,
    latest_seq: u64,
    uploaded: bool,
}

/// ウィジェットが所有するセッション状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    slots: BTreeMap<Role, Slot>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        let slots = roles
            .into_iter()
            .map(|role| (role, Slot::default()))
            .collect();
        Self { slots }
    }

    pub fn state(&self, role: &Role) -> SlotState {
        self.slots.get(role).map(|s| s.state).unwrap_or_default()
    }

    pub fn is_uploaded(&self, role: &Role) -> bool {
        self.slots.get(role).map_or(false, |s| s.uploaded)
    }

    pub fn uploaded_roles(&self) -> Vec<Role> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.uploaded)
            .map(|(role, _)| role.clone())
            .collect()
    }

    /// 比較できるのは起点ロール（child）がアップロード済みのときだけ
    ///
    /// アップロード済みフラグは消えないので、一度有効になれば以後も有効。
    pub fn compare_enabled(&self) -> bool {
        self.is_uploaded(&Role::anchor())
    }

    /// アップロードボタンを押せるか
    pub fn upload_enabled(&self, role: &Role) -> bool {
        matches!(
            self.state(role),
            SlotState::Rendering | SlotState::UploadFailed
        )
    }

    /// ファイルが選ばれた。以前の選択はこの時点で古くなる。
    ///
    /// 状態は変えない（デコードに失敗しても前の表示のまま）。
    pub fn select_file(&mut self, role: &Role) -> SelectionTicket {
        let slot = self.slots.entry(role.clone()).or_default();
        slot.latest_selection += 1;
        SelectionTicket {
            role: role.clone(),
            seq: slot.latest_selection,
        }
    }

    pub fn is_latest_selection(&self, ticket: &SelectionTicket) -> bool {
        self.slots
            .get(&ticket.role)
            .map_or(false, |s| s.latest_selection == ticket.seq)
    }

    /// 画像の描画が終わった
    ///
    /// 後から別のファイルが選ばれていれば何もしない。
    pub fn mark_rendered(&mut self, ticket: &SelectionTicket) -> Applied {
        match self.slots.get_mut(&ticket.role) {
            Some(slot) if slot.latest_selection == ticket.seq => {
                slot.state = SlotState::Rendering;
                Applied::Current
            }
            _ => Applied::Stale,
        }
    }

    /// アップロード開始。以前の受付番号はこの時点で古くなる。
    pub fn begin_upload(&mut self, role: &Role) -> UploadTicket {
        let slot = self.slots.entry(role.clone()).or_default();
        slot.latest_seq += 1;
        slot.state = SlotState::Uploading;
        UploadTicket {
            role: role.clone(),
            seq: slot.latest_seq,
        }
    }

    pub fn is_current(&self, ticket: &UploadTicket) -> bool {
        self.slots
            .get(&ticket.role)
            .map_or(false, |s| s.latest_seq == ticket.seq)
    }

    /// アップロード結果を反映する
    ///
    /// 失敗してもアップロード済みフラグは変えない。
    pub fn finish_upload(
        &mut self,
        ticket: &UploadTicket,
        outcome: &Result<(), WidgetError>,
    ) -> Applied {
        let Some(slot) = self.slots.get_mut(&ticket.role) else {
            return Applied::Stale;
        };
        if slot.latest_seq != ticket.seq {
            return Applied::Stale;
        }

        match outcome {
            Ok(()) => {
                slot.uploaded = true;
                slot.state = SlotState::Uploaded;
            }
            Err(_) => {
                slot.state = SlotState::UploadFailed;
            }
        }
        Applied::Current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(role: &Role) -> Result<(), WidgetError> {
        Err(WidgetError::UploadRejected {
            role: role.clone(),
            reason: "bad image".to_string(),
        })
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = UploadSession::with_roles(crate::role::default_roles());
        let child = Role::anchor();
        assert_eq!(session.state(&child), SlotState::Empty);
        assert!(!session.is_uploaded(&child));
        assert!(!session.compare_enabled());
        assert!(!session.upload_enabled(&child));
    }

    #[test]
    fn test_child_upload_enables_compare() {
        let mut session = UploadSession::new();
        let child = Role::anchor();
        let selection = session.select_file(&child);
        assert_eq!(session.mark_rendered(&selection), Applied::Current);
        let ticket = session.begin_upload(&child);
        assert_eq!(session.state(&child), SlotState::Uploading);
        assert!(!session.upload_enabled(&child));

        assert_eq!(session.finish_upload(&ticket, &Ok(())), Applied::Current);
        assert_eq!(session.state(&child), SlotState::Uploaded);
        assert!(session.compare_enabled());
        assert!(!session.upload_enabled(&child));
    }

    #[test]
    fn test_other_roles_do_not_enable_compare() {
        let mut session = UploadSession::new();
        for name in ["father", "mother", "pgrandma"] {
            let role = Role::new(name);
            let selection = session.select_file(&role);
            session.mark_rendered(&selection);
            let ticket = session.begin_upload(&role);
            session.finish_upload(&ticket, &Ok(()));
        }
        assert_eq!(session.uploaded_roles().len(), 3);
        assert!(!session.compare_enabled());
    }

    #[test]
    fn test_rejection_leaves_state_unset() {
        let mut session = UploadSession::new();
        let father = Role::new("father");
        let selection = session.select_file(&father);
        session.mark_rendered(&selection);
        let ticket = session.begin_upload(&father);

        assert_eq!(session.finish_upload(&ticket, &rejected(&father)), Applied::Current);
        assert!(!session.is_uploaded(&father));
        assert_eq!(session.state(&father), SlotState::UploadFailed);
        assert!(session.upload_enabled(&father));
        assert!(!session.compare_enabled());
    }

    #[test]
    fn test_rejection_does_not_revoke_compare() {
        let mut session = UploadSession::new();
        let child = Role::anchor();
        let first = session.begin_upload(&child);
        session.finish_upload(&first, &Ok(()));

        let selection = session.select_file(&child);
        session.mark_rendered(&selection);
        let second = session.begin_upload(&child);
        session.finish_upload(&second, &rejected(&child));

        assert!(session.is_uploaded(&child));
        assert!(session.compare_enabled());
    }

    #[test]
    fn test_reselect_reenables_upload_button() {
        let mut session = UploadSession::new();
        let mother = Role::new("mother");
        let ticket = session.begin_upload(&mother);
        session.finish_upload(&ticket, &Ok(()));
        assert!(!session.upload_enabled(&mother));

        let selection = session.select_file(&mother);
        session.mark_rendered(&selection);
        assert!(session.upload_enabled(&mother));
        assert!(session.is_uploaded(&mother));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = UploadSession::new();
        let child = Role::anchor();
        let older = session.begin_upload(&child);
        let newer = session.begin_upload(&child);
        assert!(!session.is_current(&older));

        // 新しい方が失敗し、古い方の成功が後から届く
        assert_eq!(session.finish_upload(&newer, &rejected(&child)), Applied::Current);
        assert_eq!(session.finish_upload(&older, &Ok(())), Applied::Stale);

        assert!(!session.is_uploaded(&child));
        assert_eq!(session.state(&child), SlotState::UploadFailed);
        assert!(!session.compare_enabled());
    }

    #[test]
    fn test_selection_keeps_state_until_rendered() {
        let mut session = UploadSession::new();
        let child = Role::anchor();
        let selection = session.select_file(&child);
        assert_eq!(session.state(&child), SlotState::Empty);
        assert!(session.is_latest_selection(&selection));
        assert!(!session.upload_enabled(&child));
    }

    #[test]
    fn test_later_pick_wins_when_decoded_first() {
        let mut session = UploadSession::new();
        let child = Role::anchor();
        // 大きいファイルA → 小さいファイルB の順に選ぶ
        let pick_a = session.select_file(&child);
        let pick_b = session.select_file(&child);

        // Bが先にデコードされてアップロードまで進む
        assert_eq!(session.mark_rendered(&pick_b), Applied::Current);
        let upload_b = session.begin_upload(&child);

        // Aのデコードが後から終わっても描画もアップロードもしない
        assert!(!session.is_latest_selection(&pick_a));
        assert_eq!(session.mark_rendered(&pick_a), Applied::Stale);
        assert_eq!(session.state(&child), SlotState::Uploading);

        assert_eq!(session.finish_upload(&upload_b, &Ok(())), Applied::Current);
        assert!(session.is_uploaded(&child));
        assert!(session.compare_enabled());
    }

    #[test]
    fn test_pick_during_upload_does_not_drop_previous_result() {
        let mut session = UploadSession::new();
        let mother = Role::new("mother");
        let first = session.select_file(&mother);
        session.mark_rendered(&first);
        let upload = session.begin_upload(&mother);

        // 次のファイルはまだデコード中
        let second = session.select_file(&mother);
        assert_eq!(session.finish_upload(&upload, &Ok(())), Applied::Current);
        assert_eq!(session.state(&mother), SlotState::Uploaded);

        assert_eq!(session.mark_rendered(&second), Applied::Current);
        assert_eq!(session.state(&mother), SlotState::Rendering);
        assert!(session.upload_enabled(&mother));
    }

    #[test]
    fn test_tickets_are_per_role() {
        let mut session = UploadSession::new();
        let child = session.begin_upload(&Role::anchor());
        let father = session.begin_upload(&Role::new("father"));
        assert_eq!(child.seq(), 1);
        assert_eq!(father.seq(), 1);
        assert!(session.is_current(&child));
        assert!(session.is_current(&father));
    }

    #[test]
    fn test_unknown_ticket_is_stale() {
        let mut other = UploadSession::new();
        let ticket = other.begin_upload(&Role::new("uncle"));
        let mut session = UploadSession::new();
        assert_eq!(session.finish_upload(&ticket, &Ok(())), Applied::Stale);
        assert!(session.uploaded_roles().is_empty());
    }
}
