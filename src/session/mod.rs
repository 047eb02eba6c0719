//! Session state machine. The UI-facing flow is expressed as an
//! immutable `ConversionState` threaded through a pure
//! `reduce(state, event)` function, with `derive_outputs` as the
//! explicit derived-value projection. Rendering is someone else's job;
//! everything here is deterministic and synchronous except the feed
//! load and the simulated settle delay in [`Session`].

use crate::catalog::PriceCatalog;
use crate::convert::{self, ConversionRequest, ConversionResult};
use crate::error::SwapError;
use crate::feed::PriceSource;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Initial feed load still in flight; token pickers empty.
    Loading,
    Ready,
    /// Simulated settlement in progress.
    Submitting,
    /// Settlement finished; success banner showing until cleared.
    Success,
}

/// The whole UI-relevant state as one immutable record. The catalog is
/// shared read-only; a feed refresh swaps in a new one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    pub catalog: Arc<PriceCatalog>,
    pub from_token: String,
    pub to_token: String,
    pub from_amount: String,
    pub to_amount: String,
    pub phase: SessionPhase,
    /// User-visible inline error, empty when there is none.
    pub message: String,
}

impl ConversionState {
    pub fn new() -> Self {
        Self {
            catalog: Arc::new(PriceCatalog::default()),
            from_token: String::new(),
            to_token: String::new(),
            from_amount: String::new(),
            to_amount: String::new(),
            phase: SessionPhase::Loading,
            message: String::new(),
        }
    }
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A freshly built catalog replaces the current one.
    PricesLoaded(PriceCatalog),
    FeedFailed,
    /// Raw keystroke-level value of the from-amount box.
    FromAmountInput(String),
    FromTokenSelected(String),
    ToTokenSelected(String),
    /// Exchange the two sides: symbols and amounts, one atomic
    /// reassignment, no recomputation.
    SwapSides,
    SubmitRequested,
    SubmitSettled,
    SuccessCleared,
}

/// Pure state transition. Never mutates its input; invalid events at the
/// wrong phase fall through to an unchanged state.
pub fn reduce(state: &ConversionState, event: SessionEvent) -> ConversionState {
    let mut next = state.clone();

    match event {
        SessionEvent::PricesLoaded(catalog) => {
            next.catalog = Arc::new(catalog);
            next.phase = SessionPhase::Ready;
            next.message.clear();
            // Default selection only when there is something to select.
            if next.catalog.len() >= 2 {
                let mut symbols = next.catalog.symbols();
                next.from_token = symbols.next().unwrap_or_default().to_string();
                next.to_token = symbols.next().unwrap_or_default().to_string();
            } else {
                next.from_token.clear();
                next.to_token.clear();
            }
            rederive_to_amount(&mut next);
        }
        SessionEvent::FeedFailed => {
            next.phase = SessionPhase::Ready;
            next.message = SwapError::FeedUnavailable(String::new())
                .user_message()
                .to_string();
        }
        SessionEvent::FromAmountInput(value) => {
            // Any keystroke that breaks the decimal-literal shape is
            // dropped and the previous value stands.
            if !convert::is_valid_amount_input(&value) {
                return next;
            }
            next.from_amount = value;
            rederive_to_amount(&mut next);
        }
        SessionEvent::FromTokenSelected(symbol) => {
            next.from_token = symbol;
            rederive_to_amount(&mut next);
        }
        SessionEvent::ToTokenSelected(symbol) => {
            next.to_token = symbol;
            rederive_to_amount(&mut next);
        }
        SessionEvent::SwapSides => {
            std::mem::swap(&mut next.from_token, &mut next.to_token);
            std::mem::swap(&mut next.from_amount, &mut next.to_amount);
        }
        SessionEvent::SubmitRequested => match validate_submission(&next) {
            Ok(()) => {
                next.message.clear();
                next.phase = SessionPhase::Submitting;
            }
            Err(err) => {
                next.message = err.user_message().to_string();
            }
        },
        SessionEvent::SubmitSettled => {
            next.phase = SessionPhase::Success;
            next.message.clear();
        }
        SessionEvent::SuccessCleared => {
            next.phase = SessionPhase::Ready;
            next.from_amount.clear();
            next.to_amount.clear();
        }
    }

    next
}

/// Explicit derived-value function: the conversion outputs for the
/// current state, recomputed from scratch after every event.
pub fn derive_outputs(state: &ConversionState) -> Result<ConversionResult, SwapError> {
    let request = ConversionRequest {
        from_symbol: state.from_token.clone(),
        to_symbol: state.to_token.clone(),
        input_amount: convert::parse_amount(&state.from_amount),
    };
    convert::convert(&state.catalog, &request)
}

/// Submission-time validation, in source order: amount first, then the
/// same-token check. Same-token pairs are rejected here and only here;
/// the rate display happily shows "1 X = 1.000000 X".
pub fn validate_submission(state: &ConversionState) -> Result<(), SwapError> {
    match convert::parse_amount(&state.from_amount) {
        Some(amount) if amount > 0.0 => {}
        _ => {
            return Err(SwapError::InvalidAmount(format!(
                "amount {:?} is empty or non-positive",
                state.from_amount
            )))
        }
    }
    if state.from_token == state.to_token {
        return Err(SwapError::SameTokenSwap(state.from_token.clone()));
    }
    Ok(())
}

/// Applies the derived output back onto the state, mirroring the
/// original flow: idle input clears the output box; a missing price
/// surfaces the inline message and leaves the previous output stale.
fn rederive_to_amount(state: &mut ConversionState) {
    match derive_outputs(state) {
        Ok(result) => {
            state.to_amount = result.output_amount.unwrap_or_default();
            state.message.clear();
        }
        Err(err) => {
            state.message = err.user_message().to_string();
        }
    }
}

/// Owns a state and a price source, and drives the asynchronous edges:
/// the feed load (with a generation counter so a stale completion is
/// discarded) and the simulated settlement delay.
pub struct Session<S: PriceSource> {
    state: ConversionState,
    source: S,
    generation: u64,
    submit_delay: Duration,
}

impl<S: PriceSource> Session<S> {
    pub fn new(source: S, submit_delay: Duration) -> Self {
        Self {
            state: ConversionState::new(),
            source,
            generation: 0,
            submit_delay,
        }
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn apply(&mut self, event: SessionEvent) {
        self.state = reduce(&self.state, event);
    }

    pub fn outputs(&self) -> Result<ConversionResult, SwapError> {
        derive_outputs(&self.state)
    }

    /// Starts a load attempt and returns its generation token.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Applies a finished load attempt. A result from a superseded
    /// attempt (a newer `begin_load` happened meanwhile) is discarded.
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Vec<crate::catalog::RawPriceEntry>, SwapError>,
    ) {
        if generation != self.generation {
            info!(
                "Discarding stale feed result (generation {} < {})",
                generation, self.generation
            );
            return;
        }
        match result {
            Ok(raw) => self.apply(SessionEvent::PricesLoaded(PriceCatalog::build(raw))),
            Err(err) => {
                warn!("Price feed load failed: {}", err);
                self.apply(SessionEvent::FeedFailed);
            }
        }
    }

    /// Fetches the feed and installs the resulting catalog. The failure
    /// is both reflected in the state (inline message) and returned, so
    /// a non-interactive caller can abort on it.
    pub async fn load_prices(&mut self) -> Result<(), SwapError> {
        let generation = self.begin_load();
        let result = self.source.fetch_prices().await;
        let failure = result.as_ref().err().cloned();
        self.finish_load(generation, result);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Runs the full submission flow: validation, simulated settlement
    /// delay, success. The error is also reflected in the state message
    /// so the caller can render either.
    pub async fn submit(&mut self) -> Result<(), SwapError> {
        if let Err(err) = validate_submission(&self.state) {
            self.apply(SessionEvent::SubmitRequested);
            return Err(err);
        }
        self.apply(SessionEvent::SubmitRequested);
        info!(
            "Submitting swap: {} {} -> {}",
            self.state.from_amount, self.state.from_token, self.state.to_token
        );

        // Simulated settlement; no real transaction happens anywhere.
        tokio::time::sleep(self.submit_delay).await;

        self.apply(SessionEvent::SubmitSettled);
        info!("Swap settled");
        Ok(())
    }
}
