//! Lazy adapters that drive a [`CollatorState`] from a token source.
//!
//! Each adapter pulls one token at a time, hands back any segments it
//! completes before pulling the next, and flushes the state once the source
//! is exhausted.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use murmur_config::CollatorConfig;
use murmur_core::{Segment, Token};

use crate::CollatorState;

/// Collate a synchronous token source.
///
/// ```
/// use murmur_collator::collate_iter;
/// use murmur_config::CollatorConfig;
/// use murmur_core::{Segment, Token};
///
/// let tokens = ["Hello", " world.", " Bye"].map(Token::text);
/// let segments: Vec<Segment> = collate_iter(tokens, &CollatorConfig::default()).collect();
/// assert_eq!(segments, vec![Segment::text("Hello world."), Segment::text("Bye")]);
/// ```
pub fn collate_iter<I>(tokens: I, config: &CollatorConfig) -> CollateIter<I::IntoIter>
where
    I: IntoIterator<Item = Token>,
{
    CollateIter {
        tokens: tokens.into_iter(),
        state: Some(CollatorState::new(config)),
        pending: VecDeque::new(),
    }
}

/// Collate an async token stream.
///
/// Dropping the returned stream before it ends discards any partial sentence.
pub fn collate<S>(tokens: S, config: &CollatorConfig) -> Collate<S>
where
    S: Stream<Item = Token> + Unpin,
{
    Collate {
        tokens,
        state: Some(CollatorState::new(config)),
        pending: VecDeque::new(),
    }
}

/// Collate an async token stream whose source can fail.
///
/// The first upstream error is yielded once and ends the stream; whatever
/// was buffered at that point is abandoned.
pub fn try_collate<S, E>(tokens: S, config: &CollatorConfig) -> TryCollate<S>
where
    S: Stream<Item = Result<Token, E>> + Unpin,
{
    TryCollate {
        tokens,
        state: Some(CollatorState::new(config)),
        pending: VecDeque::new(),
    }
}

/// Iterator returned by [`collate_iter`].
#[derive(Debug)]
pub struct CollateIter<I> {
    tokens: I,
    /// `None` once the source is exhausted and the state flushed
    state: Option<CollatorState>,
    pending: VecDeque<Segment>,
}

impl<I> Iterator for CollateIter<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        loop {
            if let Some(segment) = self.pending.pop_front() {
                return Some(segment);
            }

            let state = self.state.as_mut()?;
            match self.tokens.next() {
                Some(token) => self.pending.extend(state.push(token)),
                None => {
                    let state = self.state.take()?;
                    self.pending.extend(state.finish());
                }
            }
        }
    }
}

/// Stream returned by [`collate`].
#[derive(Debug)]
pub struct Collate<S> {
    tokens: S,
    state: Option<CollatorState>,
    pending: VecDeque<Segment>,
}

impl<S> Stream for Collate<S>
where
    S: Stream<Item = Token> + Unpin,
{
    type Item = Segment;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Segment>> {
        let this = &mut *self;
        loop {
            if let Some(segment) = this.pending.pop_front() {
                return Poll::Ready(Some(segment));
            }

            let Some(state) = this.state.as_mut() else {
                return Poll::Ready(None);
            };

            match this.tokens.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(token)) => this.pending.extend(state.push(token)),
                Poll::Ready(None) => {
                    if let Some(state) = this.state.take() {
                        this.pending.extend(state.finish());
                    }
                }
            }
        }
    }
}

/// Stream returned by [`try_collate`].
#[derive(Debug)]
pub struct TryCollate<S> {
    tokens: S,
    state: Option<CollatorState>,
    pending: VecDeque<Segment>,
}

impl<S, E> Stream for TryCollate<S>
where
    S: Stream<Item = Result<Token, E>> + Unpin,
{
    type Item = Result<Segment, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if let Some(segment) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(segment)));
            }

            let Some(state) = this.state.as_mut() else {
                return Poll::Ready(None);
            };

            match this.tokens.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(token))) => this.pending.extend(state.push(token)),
                Poll::Ready(Some(Err(err))) => {
                    if let Some(abandoned) = this.state.take() {
                        tracing::debug!(
                            buffered = abandoned.buffered_text().len(),
                            "Upstream token source failed; abandoning partial segment"
                        );
                    }
                    return Poll::Ready(Some(Err(err)));
                }
                Poll::Ready(None) => {
                    if let Some(state) = this.state.take() {
                        this.pending.extend(state.finish());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use murmur_core::FunctionCall;

    fn texts(tokens: &[&str]) -> Vec<Token> {
        tokens.iter().map(|t| Token::text(*t)).collect()
    }

    #[test]
    fn iter_is_lazy() {
        let mut pulled = 0;
        let tokens = texts(&["One.", " Two.", " Three."])
            .into_iter()
            .inspect(|_| pulled += 1);
        let mut segments = collate_iter(tokens, &CollatorConfig::default());

        assert_eq!(segments.next(), Some(Segment::text("One.")));
        drop(segments);
        assert_eq!(pulled, 1);
    }

    #[test]
    fn iter_fuses_after_end() {
        let mut segments = collate_iter(texts(&["Only"]), &CollatorConfig::default());
        assert_eq!(segments.next(), Some(Segment::text("Only")));
        assert_eq!(segments.next(), None);
        assert_eq!(segments.next(), None);
    }

    #[tokio::test]
    async fn stream_collates_sentences() {
        let tokens = stream::iter(texts(&["Hello", " world.", " Next sentence."]));
        let segments: Vec<Segment> = collate(tokens, &CollatorConfig::default())
            .collect()
            .await;
        assert_eq!(
            segments,
            vec![Segment::text("Hello world."), Segment::text("Next sentence.")]
        );
    }

    #[tokio::test]
    async fn stream_emits_function_call_last() {
        let config = CollatorConfig::default().with_emit_function(true);
        let tokens = stream::iter(vec![
            Token::text("One moment."),
            Token::function("get_", ""),
            Token::function("weather", "{\"city\":"),
            Token::function("", "\"NYC\"}"),
            Token::text(" Checking"),
        ]);
        let segments: Vec<Segment> = collate(tokens, &config).collect().await;
        assert_eq!(
            segments,
            vec![
                Segment::text("One moment."),
                Segment::text("Checking"),
                Segment::FunctionCall(FunctionCall {
                    name: "get_weather".into(),
                    arguments: "{\"city\":\"NYC\"}".into(),
                }),
            ]
        );
    }

    #[tokio::test]
    async fn try_collate_passes_segments_through() {
        let tokens = stream::iter(vec![
            Ok::<_, String>(Token::text("Fine.")),
            Ok(Token::text(" Also fine")),
        ]);
        let segments: Vec<Result<Segment, String>> =
            try_collate(tokens, &CollatorConfig::default()).collect().await;
        assert_eq!(
            segments,
            vec![Ok(Segment::text("Fine.")), Ok(Segment::text("Also fine"))]
        );
    }

    #[tokio::test]
    async fn try_collate_abandons_partial_on_error() {
        let tokens = stream::iter(vec![
            Ok(Token::text("Done.")),
            Ok(Token::text(" Half")),
            Err("connection reset".to_string()),
            Ok(Token::text(" never seen.")),
        ]);
        let segments: Vec<Result<Segment, String>> =
            try_collate(tokens, &CollatorConfig::default()).collect().await;
        assert_eq!(
            segments,
            vec![
                Ok(Segment::text("Done.")),
                Err("connection reset".to_string()),
            ]
        );
    }
}
