//! `CartSync`: keeps the cart widget in step with the server cart.
//!
//! The component owns one `CartSnapshot`. Each operation asks the backend to
//! change the cart, and every successful answer replaces the snapshot
//! wholesale and repaints the view. Failed calls never touch the snapshot.
//!
//! Requests are numbered as they are issued. A response is applied only if
//! it is newer than the last applied one, so a slow answer to an early click
//! cannot overwrite the result of a later click.

use crate::backend::{CartBackend, CartView};
use crate::cart::{CartSnapshot, CartUpdate, QuantityStep};
use crate::error::SyncError;
use crate::id::ProductId;
use crate::messages;
use crate::price::NumberLocale;
use crate::render::CartRender;
use crate::toast::Toast;
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// What happened to a single cart operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Response was applied to the snapshot and view
    Applied,
    /// Response arrived after a newer one had been applied and was dropped
    Superseded,
    /// No request was sent
    Skipped,
    Failed(SyncError),
}

/// Cart widget controller. Cheap to clone; clones share state.
pub struct CartSync<B, V> {
    inner: Rc<CartInner<B, V>>,
}

struct CartInner<B, V> {
    backend: B,
    view: V,
    locale: NumberLocale,
    snapshot: RefCell<CartSnapshot>,
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl<B, V> Clone for CartSync<B, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<B: CartBackend, V: CartView> CartSync<B, V> {
    pub fn new(backend: B, view: V, locale: NumberLocale) -> Self {
        Self {
            inner: Rc::new(CartInner {
                backend,
                view,
                locale,
                snapshot: RefCell::new(CartSnapshot::default()),
                issued: Cell::new(0),
                applied: Cell::new(0),
            }),
        }
    }

    /// Copy of the snapshot currently on display.
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    fn next_seq(&self) -> u64 {
        let seq = self.inner.issued.get() + 1;
        self.inner.issued.set(seq);
        seq
    }

    /// Fetch the cart summary. Failures are logged only.
    pub async fn load(&self) -> SyncOutcome {
        let seq = self.next_seq();
        debug!("Loading cart summary (request #{})", seq);
        match self.inner.backend.summary().await {
            Ok(update) => self.apply(seq, update.snapshot, false),
            Err(e) => {
                error!("Failed to load cart: {}", e);
                SyncOutcome::Failed(e)
            }
        }
    }

    pub async fn add(&self, product_id: ProductId, quantity: u32) -> SyncOutcome {
        let seq = self.next_seq();
        info!("Adding product {} x{} (request #{})", product_id, quantity, seq);
        let result = self.inner.backend.add(product_id, quantity).await;
        self.settle(
            seq,
            result,
            Some(messages::CART_ADDED),
            messages::CART_ADD_FAILED,
        )
    }

    pub async fn remove(&self, product_id: ProductId) -> SyncOutcome {
        let seq = self.next_seq();
        info!("Removing product {} (request #{})", product_id, seq);
        let result = self.inner.backend.remove(product_id).await;
        self.settle(
            seq,
            result,
            Some(messages::CART_REMOVED),
            messages::CART_REMOVE_FAILED,
        )
    }

    /// Step the displayed quantity of a line up or down by one.
    ///
    /// A product without a displayed line counts as quantity 1. Stepping
    /// below 1 is skipped without contacting the server.
    pub async fn update_quantity(&self, product_id: ProductId, step: QuantityStep) -> SyncOutcome {
        let shown = self
            .inner
            .snapshot
            .borrow()
            .quantity_of(product_id)
            .unwrap_or(1);
        let Some(quantity) = step.apply(shown) else {
            debug!(
                "Not stepping product {} below 1 (shown {})",
                product_id, shown
            );
            return SyncOutcome::Skipped;
        };

        let seq = self.next_seq();
        info!(
            "Updating product {} to {} (request #{})",
            product_id, quantity, seq
        );
        let result = self.inner.backend.update(product_id, quantity).await;
        self.settle(seq, result, None, messages::CART_UPDATE_FAILED)
    }

    pub async fn clear(&self) -> SyncOutcome {
        let seq = self.next_seq();
        info!("Clearing cart (request #{})", seq);
        let result = self.inner.backend.clear().await;
        self.settle(
            seq,
            result,
            Some(messages::CART_CLEARED),
            messages::CART_CLEAR_FAILED,
        )
    }

    fn settle(
        &self,
        seq: u64,
        result: Result<CartUpdate, SyncError>,
        success_text: Option<&str>,
        failure_text: &str,
    ) -> SyncOutcome {
        match result {
            Ok(update) => {
                let outcome = self.apply(seq, update.snapshot, true);
                // The server accepted the change even if a newer answer is on screen.
                if let Some(default) = success_text {
                    let text = update.message.unwrap_or_else(|| default.to_string());
                    self.inner.view.toast(Toast::success(text));
                }
                outcome
            }
            Err(e) => {
                error!("Cart request #{} failed: {}", seq, e);
                let text = match (e.server_message(), &e) {
                    (Some(msg), _) => msg.to_string(),
                    (None, SyncError::Rejected(None)) => failure_text.to_string(),
                    (None, _) => messages::SERVER_UNREACHABLE.to_string(),
                };
                self.inner.view.toast(Toast::error(text));
                SyncOutcome::Failed(e)
            }
        }
    }

    fn apply(&self, seq: u64, snapshot: CartSnapshot, pulse: bool) -> SyncOutcome {
        let applied = self.inner.applied.get();
        if seq <= applied {
            warn!(
                "Dropping cart response #{}, already showing #{}",
                seq, applied
            );
            return SyncOutcome::Superseded;
        }
        self.inner.applied.set(seq);

        let render = CartRender::from_snapshot(&snapshot, self.inner.locale);
        *self.inner.snapshot.borrow_mut() = snapshot;
        self.inner.view.render(&render);
        if pulse {
            self.inner.view.pulse_counter();
        }
        info!("Cart now shows {} item(s)", render.card_count());
        SyncOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartEnvelope, CartLine};
    use crate::render::CartBody;
    use rust_decimal::Decimal;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    type Reply = oneshot::Receiver<Result<CartUpdate, SyncError>>;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Summary,
        Add(ProductId, u32),
        Remove(ProductId),
        Update(ProductId, u32),
        Clear,
    }

    /// Backend whose replies are fed through oneshot channels, in call order.
    #[derive(Default)]
    struct ScriptedBackend {
        calls: RefCell<Vec<Call>>,
        replies: RefCell<VecDeque<Reply>>,
    }

    impl ScriptedBackend {
        fn reply_later(&self) -> oneshot::Sender<Result<CartUpdate, SyncError>> {
            let (tx, rx) = oneshot::channel();
            self.replies.borrow_mut().push_back(rx);
            tx
        }

        fn reply_now(&self, reply: Result<CartUpdate, SyncError>) {
            let _ = self.reply_later().send(reply);
        }

        async fn answer(&self, call: Call) -> Result<CartUpdate, SyncError> {
            self.calls.borrow_mut().push(call);
            let rx = self
                .replies
                .borrow_mut()
                .pop_front()
                .expect("unexpected backend call");
            rx.await.expect("reply sender dropped")
        }
    }

    impl CartBackend for ScriptedBackend {
        async fn summary(&self) -> Result<CartUpdate, SyncError> {
            self.answer(Call::Summary).await
        }
        async fn add(&self, product_id: ProductId, quantity: u32) -> Result<CartUpdate, SyncError> {
            self.answer(Call::Add(product_id, quantity)).await
        }
        async fn remove(&self, product_id: ProductId) -> Result<CartUpdate, SyncError> {
            self.answer(Call::Remove(product_id)).await
        }
        async fn update(
            &self,
            product_id: ProductId,
            quantity: u32,
        ) -> Result<CartUpdate, SyncError> {
            self.answer(Call::Update(product_id, quantity)).await
        }
        async fn clear(&self) -> Result<CartUpdate, SyncError> {
            self.answer(Call::Clear).await
        }
    }

    #[derive(Default)]
    struct RecordingView {
        renders: RefCell<Vec<CartRender>>,
        pulses: Cell<usize>,
        toasts: RefCell<Vec<Toast>>,
    }

    impl CartView for RecordingView {
        fn render(&self, render: &CartRender) {
            self.renders.borrow_mut().push(render.clone());
        }
        fn pulse_counter(&self) {
            self.pulses.set(self.pulses.get() + 1);
        }
        fn toast(&self, toast: Toast) {
            self.toasts.borrow_mut().push(toast);
        }
    }

    fn cart_with(quantity: u32) -> CartUpdate {
        let unit = Decimal::from(1000);
        CartUpdate {
            snapshot: CartSnapshot {
                cart_count: quantity,
                items: vec![CartLine {
                    id: ProductId::new(7),
                    name: "X".to_string(),
                    image: "/x.png".to_string(),
                    quantity,
                    unit_price: unit,
                    line_total: unit * Decimal::from(quantity),
                }],
                total_price: unit * Decimal::from(quantity),
            },
            message: None,
        }
    }

    fn sync() -> CartSync<ScriptedBackend, RecordingView> {
        CartSync::new(
            ScriptedBackend::default(),
            RecordingView::default(),
            NumberLocale::Latin,
        )
    }

    #[tokio::test]
    async fn test_load_renders_summary() {
        let sync = sync();
        let body = r#"{"success":true,"cart_count":2,"items":[{"id":7,"name":"X","quantity":2,"final_price":1000,"total_price":2000,"image":"/x.png"}],"total_price":2000}"#;
        sync.backend()
            .reply_now(CartEnvelope::from_json(body).unwrap().into_update());

        assert_eq!(sync.load().await, SyncOutcome::Applied);
        let renders = sync.view().renders.borrow();
        let last = renders.last().unwrap();
        assert_eq!(last.counter, "2");
        assert_eq!(last.total, "2,000 تومان");
        match &last.body {
            CartBody::Lines(cards) => assert_eq!(cards[0].quantity_label, "2 × 1,000"),
            CartBody::Empty(_) => panic!("expected lines"),
        }
        assert_eq!(sync.view().pulses.get(), 0);
        assert!(sync.view().toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_add_applies_and_toasts_server_message() {
        let sync = sync();
        let mut update = cart_with(1);
        update.message = Some("added!".to_string());
        sync.backend().reply_now(Ok(update));

        assert_eq!(sync.add(ProductId::new(7), 1).await, SyncOutcome::Applied);
        assert_eq!(
            *sync.backend().calls.borrow(),
            vec![Call::Add(ProductId::new(7), 1)]
        );
        assert_eq!(sync.snapshot().cart_count, 1);
        assert_eq!(sync.view().pulses.get(), 1);
        assert_eq!(*sync.view().toasts.borrow(), vec![Toast::success("added!")]);
    }

    #[tokio::test]
    async fn test_rendered_cards_match_items() {
        let sync = sync();
        sync.backend().reply_now(Ok(cart_with(3)));
        sync.add(ProductId::new(7), 3).await;
        let render = sync.view().renders.borrow().last().cloned().unwrap();
        assert_eq!(render.card_count(), sync.snapshot().items.len());
        assert_eq!(render.total, "3,000 تومان");
    }

    #[tokio::test]
    async fn test_decrement_below_one_sends_nothing() {
        let sync = sync();
        sync.backend().reply_now(Ok(cart_with(1)));
        sync.load().await;

        let outcome = sync
            .update_quantity(ProductId::new(7), QuantityStep::Decrement)
            .await;
        assert_eq!(outcome, SyncOutcome::Skipped);
        assert_eq!(*sync.backend().calls.borrow(), vec![Call::Summary]);
    }

    #[tokio::test]
    async fn test_increment_uses_displayed_quantity() {
        let sync = sync();
        sync.backend().reply_now(Ok(cart_with(2)));
        sync.load().await;
        sync.backend().reply_now(Ok(cart_with(3)));

        let outcome = sync
            .update_quantity(ProductId::new(7), QuantityStep::Increment)
            .await;
        assert_eq!(outcome, SyncOutcome::Applied);
        assert_eq!(
            sync.backend().calls.borrow().last(),
            Some(&Call::Update(ProductId::new(7), 3))
        );
        // quantity updates have no success toast
        assert!(sync.view().toasts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_line_counts_as_one() {
        let sync = sync();
        sync.backend().reply_now(Ok(cart_with(2)));
        sync.update_quantity(ProductId::new(99), QuantityStep::Increment)
            .await;
        assert_eq!(
            *sync.backend().calls.borrow(),
            vec![Call::Update(ProductId::new(99), 2)]
        );
        assert_eq!(
            sync.update_quantity(ProductId::new(98), QuantityStep::Decrement)
                .await,
            SyncOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn test_rejection_keeps_snapshot_and_shows_server_error() {
        let sync = sync();
        sync.backend().reply_now(Ok(cart_with(2)));
        sync.load().await;
        let before = sync.snapshot();
        let renders_before = sync.view().renders.borrow().len();

        sync.backend()
            .reply_now(Err(SyncError::Rejected(Some("محصول یافت نشد".to_string()))));
        let outcome = sync.remove(ProductId::new(7)).await;

        assert!(matches!(outcome, SyncOutcome::Failed(SyncError::Rejected(_))));
        assert_eq!(sync.snapshot(), before);
        assert_eq!(sync.view().renders.borrow().len(), renders_before);
        assert_eq!(
            *sync.view().toasts.borrow(),
            vec![Toast::error("محصول یافت نشد")]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_shows_generic_error() {
        let sync = sync();
        sync.backend()
            .reply_now(Err(SyncError::Transport("connection refused".to_string())));
        sync.clear().await;
        assert_eq!(
            *sync.view().toasts.borrow(),
            vec![Toast::error(messages::SERVER_UNREACHABLE)]
        );
        assert_eq!(sync.snapshot(), CartSnapshot::default());
    }

    #[tokio::test]
    async fn test_rejection_without_text_uses_operation_default() {
        let sync = sync();
        sync.backend().reply_now(Err(SyncError::Rejected(None)));
        sync.clear().await;
        assert_eq!(
            *sync.view().toasts.borrow(),
            vec![Toast::error(messages::CART_CLEAR_FAILED)]
        );
    }

    #[tokio::test]
    async fn test_late_older_response_is_dropped() {
        let sync = sync();
        let first = sync.backend().reply_later();
        let second = sync.backend().reply_later();

        let (a, b, _) = tokio::join!(
            sync.add(ProductId::new(7), 1),
            sync.add(ProductId::new(7), 1),
            async {
                let _ = second.send(Ok(cart_with(2)));
                tokio::task::yield_now().await;
                let _ = first.send(Ok(cart_with(1)));
            }
        );

        let outcomes = [a, b];
        assert_eq!(
            outcomes.iter().filter(|o| **o == SyncOutcome::Applied).count(),
            1
        );
        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == SyncOutcome::Superseded)
                .count(),
            1
        );
        assert_eq!(sync.snapshot().cart_count, 2);
        assert_eq!(sync.view().renders.borrow().len(), 1);
    }
}
