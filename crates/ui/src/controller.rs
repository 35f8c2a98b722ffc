//! Board controller
//!
//! Turns the two user actions (sign up, remove participant) into API calls and
//! keeps the view in step with the server. The DOM and the network sit behind
//! `BoardView` and `ActivityApi` so the flow runs the same under test.

use std::cell::Cell;
use std::rc::Rc;

use activity_board_protocol::{messages, ActivityMap, MessageKind};
use tracing::{debug, error, info};

use crate::config::ClientConfig;
use crate::error::BoardError;
use crate::network::ActivityApi;

/// What the controller needs from the page
pub trait BoardView {
    /// Rebuild the card list and the activity select from scratch
    fn render_activities(&self, activities: &ActivityMap, remover: Rc<dyn ParticipantRemover>);

    /// Replace the card list with the load failure notice
    fn show_load_failure(&self);

    /// Show the banner. Cancels any pending auto-hide.
    fn show_message(&self, text: &str, kind: MessageKind);

    /// Hide the banner after `delay_ms`
    fn hide_message_after(&self, delay_ms: u32);

    fn reset_form(&self);
}

/// Target of the per-participant remove buttons
pub trait ParticipantRemover {
    fn request_removal(self: Rc<Self>, activity: String, email: String);
}

/// Hands out reload tickets. Only the newest ticket may touch the view.
#[derive(Debug, Default)]
pub struct ReloadSequence {
    latest: Cell<u64>,
}

impl ReloadSequence {
    pub fn issue(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }
}

pub struct BoardController<A, V> {
    api: A,
    view: V,
    config: ClientConfig,
    reloads: ReloadSequence,
}

impl<A, V> BoardController<A, V>
where
    A: ActivityApi + 'static,
    V: BoardView + 'static,
{
    pub fn new(api: A, view: V, config: ClientConfig) -> Rc<Self> {
        Rc::new(Self {
            api,
            view,
            config,
            reloads: ReloadSequence::default(),
        })
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Fetch the board and redraw it
    pub async fn load_activities(self: &Rc<Self>) {
        let ticket = self.reloads.issue();
        let result = self.api.fetch_activities().await;

        if !self.reloads.is_latest(ticket) {
            debug!(ticket, "discarding stale activities response");
            return;
        }

        match result {
            Ok(activities) => {
                info!(count = activities.len(), "activities loaded");
                let remover: Rc<dyn ParticipantRemover> = Rc::<Self>::clone(self);
                self.view.render_activities(&activities, remover);
            }
            Err(err) => {
                error!(error = %err, "error fetching activities");
                self.view.show_load_failure();
            }
        }
    }

    pub async fn sign_up(self: &Rc<Self>, email: &str, activity: &str) {
        match self.api.sign_up(activity, email).await {
            Ok(message) => {
                self.view.show_message(&message, MessageKind::Success);
                self.view.reset_form();
                self.view.hide_message_after(self.config.signup_message_ms);
                self.load_activities().await;
            }
            Err(BoardError::Rejected { status, detail }) => {
                debug!(status, activity, "sign-up rejected");
                let text = detail.as_deref().unwrap_or(messages::SIGNUP_REJECTED);
                self.view.show_message(text, MessageKind::Error);
                self.view.hide_message_after(self.config.signup_message_ms);
            }
            Err(err) => {
                error!(error = %err, activity, "error signing up");
                self.view.show_message(messages::SIGNUP_FAILED, MessageKind::Error);
            }
        }
    }

    pub async fn remove_participant(self: &Rc<Self>, activity: &str, email: &str) {
        match self.api.remove_participant(activity, email).await {
            Ok(message) => {
                self.view.show_message(&message, MessageKind::Success);
                self.view.hide_message_after(self.config.removal_message_ms);
                self.load_activities().await;
            }
            Err(BoardError::Rejected { status, detail }) => {
                debug!(status, activity, "participant removal rejected");
                let text = detail.as_deref().unwrap_or(messages::REMOVE_REJECTED);
                self.view.show_message(text, MessageKind::Error);
            }
            Err(err) => {
                error!(error = %err, activity, "error removing participant");
                self.view.show_message(messages::REMOVE_FAILED, MessageKind::Error);
            }
        }
    }

    /// Start a reload from an event handler
    pub fn spawn_reload(self: &Rc<Self>) {
        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            this.load_activities().await;
        });
    }

    /// Start a sign-up from the form submit handler
    pub fn spawn_sign_up(self: &Rc<Self>, email: String, activity: String) {
        let this = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            this.sign_up(&email, &activity).await;
        });
    }
}

impl<A, V> ParticipantRemover for BoardController<A, V>
where
    A: ActivityApi + 'static,
    V: BoardView + 'static,
{
    fn request_removal(self: Rc<Self>, activity: String, email: String) {
        wasm_bindgen_futures::spawn_local(async move {
            self.remove_participant(&activity, &email).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use activity_board_protocol::{parse_activities, Activity};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    use super::*;

    type BoardReply = Result<ActivityMap, BoardError>;

    #[derive(Default)]
    struct FakeApi {
        boards: RefCell<VecDeque<oneshot::Receiver<BoardReply>>>,
        replies: RefCell<VecDeque<Result<String, BoardError>>>,
        fetches: Cell<usize>,
        calls: RefCell<Vec<(&'static str, String, String)>>,
    }

    impl FakeApi {
        fn queue_board(&self, reply: BoardReply) {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(reply);
            self.boards.borrow_mut().push_back(rx);
        }

        fn defer_board(&self) -> oneshot::Sender<BoardReply> {
            let (tx, rx) = oneshot::channel();
            self.boards.borrow_mut().push_back(rx);
            tx
        }

        fn queue_reply(&self, reply: Result<String, BoardError>) {
            self.replies.borrow_mut().push_back(reply);
        }

        fn next_reply(&self) -> Result<String, BoardError> {
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(BoardError::Transport("no scripted reply".into())))
        }
    }

    #[async_trait(?Send)]
    impl ActivityApi for FakeApi {
        async fn fetch_activities(&self) -> Result<ActivityMap, BoardError> {
            self.fetches.set(self.fetches.get() + 1);
            let next = self.boards.borrow_mut().pop_front();
            match next {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(BoardError::Transport("dropped".into()))),
                None => Err(BoardError::Transport("no scripted board".into())),
            }
        }

        async fn sign_up(&self, activity: &str, email: &str) -> Result<String, BoardError> {
            self.calls.borrow_mut().push(("signup", activity.into(), email.into()));
            self.next_reply()
        }

        async fn remove_participant(&self, activity: &str, email: &str) -> Result<String, BoardError> {
            self.calls.borrow_mut().push(("remove", activity.into(), email.into()));
            self.next_reply()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Seen {
        Rendered(Vec<String>),
        LoadFailed,
        Message(String, MessageKind),
        HideAfter(u32),
        FormReset,
    }

    #[derive(Default)]
    struct FakeView {
        seen: RefCell<Vec<Seen>>,
    }

    impl FakeView {
        fn take(&self) -> Vec<Seen> {
            std::mem::take(&mut *self.seen.borrow_mut())
        }
    }

    impl BoardView for FakeView {
        fn render_activities(&self, activities: &ActivityMap, _remover: Rc<dyn ParticipantRemover>) {
            self.seen
                .borrow_mut()
                .push(Seen::Rendered(activities.keys().cloned().collect()));
        }

        fn show_load_failure(&self) {
            self.seen.borrow_mut().push(Seen::LoadFailed);
        }

        fn show_message(&self, text: &str, kind: MessageKind) {
            self.seen.borrow_mut().push(Seen::Message(text.into(), kind));
        }

        fn hide_message_after(&self, delay_ms: u32) {
            self.seen.borrow_mut().push(Seen::HideAfter(delay_ms));
        }

        fn reset_form(&self) {
            self.seen.borrow_mut().push(Seen::FormReset);
        }
    }

    fn board(names: &[&str]) -> ActivityMap {
        names
            .iter()
            .map(|name| {
                let activity = Activity {
                    description: format!("{name} description"),
                    schedule: "Fridays, 3:30 PM - 5:00 PM".into(),
                    max_participants: 12,
                    participants: vec![],
                };
                ((*name).to_string(), activity)
            })
            .collect()
    }

    fn controller() -> Rc<BoardController<FakeApi, FakeView>> {
        BoardController::new(FakeApi::default(), FakeView::default(), ClientConfig::default())
    }

    fn rendered(names: &[&str]) -> Seen {
        Seen::Rendered(names.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_load_renders_in_server_order() {
        let c = controller();
        let body = r#"{
            "Programming Class": {"description": "d", "schedule": "s", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 12, "participants": []}
        }"#;
        c.api().queue_board(Ok(parse_activities(body).unwrap()));

        block_on(c.load_activities());

        assert_eq!(c.view().take(), vec![rendered(&["Programming Class", "Chess Club"])]);
    }

    #[test]
    fn test_load_failure_shows_notice() {
        let c = controller();
        c.api().queue_board(Err(BoardError::Transport("offline".into())));

        block_on(c.load_activities());

        assert_eq!(c.view().take(), vec![Seen::LoadFailed]);
    }

    #[test]
    fn test_sign_up_success_resets_and_reloads() {
        let c = controller();
        c.api().queue_reply(Ok("Signed up a@mergington.edu for Chess Club".into()));
        c.api().queue_board(Ok(board(&["Chess Club"])));

        block_on(c.sign_up("a@mergington.edu", "Chess Club"));

        assert_eq!(
            c.view().take(),
            vec![
                Seen::Message("Signed up a@mergington.edu for Chess Club".into(), MessageKind::Success),
                Seen::FormReset,
                Seen::HideAfter(5000),
                rendered(&["Chess Club"]),
            ]
        );
        assert_eq!(c.api().fetches.get(), 1);
        assert_eq!(
            c.api().calls.borrow().as_slice(),
            [("signup", "Chess Club".to_string(), "a@mergington.edu".to_string())]
        );
    }

    #[test]
    fn test_sign_up_rejected_shows_detail_and_keeps_form() {
        let c = controller();
        c.api().queue_reply(Err(BoardError::Rejected {
            status: 400,
            detail: Some("Activity not found".into()),
        }));

        block_on(c.sign_up("a@mergington.edu", "Knitting"));

        assert_eq!(
            c.view().take(),
            vec![
                Seen::Message("Activity not found".into(), MessageKind::Error),
                Seen::HideAfter(5000),
            ]
        );
        assert_eq!(c.api().fetches.get(), 0);
    }

    #[test]
    fn test_sign_up_rejected_without_detail_uses_fallback() {
        let c = controller();
        c.api().queue_reply(Err(BoardError::Rejected { status: 500, detail: None }));

        block_on(c.sign_up("a@mergington.edu", "Chess Club"));

        assert_eq!(
            c.view().take(),
            vec![
                Seen::Message("An error occurred".into(), MessageKind::Error),
                Seen::HideAfter(5000),
            ]
        );
    }

    #[test]
    fn test_sign_up_transport_failure_is_generic() {
        let c = controller();
        c.api().queue_reply(Err(BoardError::Transport("Failed to fetch".into())));

        block_on(c.sign_up("a@mergington.edu", "Chess Club"));

        assert_eq!(
            c.view().take(),
            vec![Seen::Message("Failed to sign up. Please try again.".into(), MessageKind::Error)]
        );
    }

    #[test]
    fn test_remove_success_hides_after_3s_and_reloads() {
        let c = controller();
        c.api().queue_reply(Ok("Removed james@mergington.edu from Swimming Club".into()));
        c.api().queue_board(Ok(board(&["Swimming Club"])));

        block_on(c.remove_participant("Swimming Club", "james@mergington.edu"));

        assert_eq!(
            c.view().take(),
            vec![
                Seen::Message("Removed james@mergington.edu from Swimming Club".into(), MessageKind::Success),
                Seen::HideAfter(3000),
                rendered(&["Swimming Club"]),
            ]
        );
        assert_eq!(c.api().fetches.get(), 1);
    }

    #[test]
    fn test_remove_rejected_and_failed() {
        let c = controller();
        c.api().queue_reply(Err(BoardError::Rejected {
            status: 404,
            detail: Some("Participant not found in this activity".into()),
        }));
        c.api().queue_reply(Err(BoardError::Rejected { status: 404, detail: None }));
        c.api().queue_reply(Err(BoardError::Transport("Failed to fetch".into())));

        block_on(c.remove_participant("Chess Club", "ghost@mergington.edu"));
        block_on(c.remove_participant("Chess Club", "ghost@mergington.edu"));
        block_on(c.remove_participant("Chess Club", "ghost@mergington.edu"));

        assert_eq!(
            c.view().take(),
            vec![
                Seen::Message("Participant not found in this activity".into(), MessageKind::Error),
                Seen::Message("Failed to remove participant".into(), MessageKind::Error),
                Seen::Message("Failed to remove participant. Please try again.".into(), MessageKind::Error),
            ]
        );
        assert_eq!(c.api().fetches.get(), 0);
    }

    #[test]
    fn test_stale_reload_is_discarded() {
        let c = controller();
        let first = c.api().defer_board();
        let second = c.api().defer_board();

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let c = Rc::clone(&c);
            spawner
                .spawn_local(async move { c.load_activities().await })
                .unwrap();
            pool.run_until_stalled();
        }

        second.send(Ok(board(&["Newer"]))).unwrap();
        pool.run_until_stalled();
        first.send(Ok(board(&["Older"]))).unwrap();
        pool.run_until_stalled();

        assert_eq!(c.view().take(), vec![rendered(&["Newer"])]);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_board() {
        let c = controller();
        let first = c.api().defer_board();
        let second = c.api().defer_board();

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        for _ in 0..2 {
            let c = Rc::clone(&c);
            spawner
                .spawn_local(async move { c.load_activities().await })
                .unwrap();
            pool.run_until_stalled();
        }

        first.send(Err(BoardError::Transport("timeout".into()))).unwrap();
        pool.run_until_stalled();
        second.send(Ok(board(&["Chess Club"]))).unwrap();
        pool.run_until_stalled();

        assert_eq!(c.view().take(), vec![rendered(&["Chess Club"])]);
    }

    #[test]
    fn test_reload_sequence() {
        let seq = ReloadSequence::default();
        let a = seq.issue();
        assert!(seq.is_latest(a));
        let b = seq.issue();
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
    }
}
