// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Watcher behaviour driven by scripted probes on a paused clock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::StreamExt;
use stbwatch::error::{ConfigError, Error, NetworkError};
use stbwatch::event::{StateChangeEvent, WatchGroup};
use stbwatch::watcher::{FirstObservation, StateStream, StateWatcher, WatchConfig};
use stbwatch::{Probe, Result};
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_millis(10);
const QUIET: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
enum Step {
    Sample(bool),
    Fail,
    Hang,
}

use Step::{Fail, Hang, Sample};

/// Replays a fixed list of outcomes, then fails forever.
#[derive(Debug, Clone)]
struct ScriptedProbe {
    script: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            script: Arc::new(Mutex::new(steps.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn samples(samples: &[bool]) -> Self {
        Self::new(samples.iter().map(|&s| Sample(s)))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Probe for ScriptedProbe {
    async fn probe(&self) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Sample(online)) => Ok(online),
            Some(Hang) => Ok(std::future::pending::<bool>().await),
            Some(Fail) | None => {
                Err(NetworkError::ConnectionFailed("connection refused".to_string()).into())
            }
        }
    }
}

fn config(first: FirstObservation) -> WatchConfig {
    WatchConfig::new()
        .with_interval(INTERVAL)
        .with_first_observation(first)
}

fn spawn(probe: ScriptedProbe, first: FirstObservation) -> StateStream {
    StateWatcher::new(probe, config(first)).unwrap().spawn()
}

/// Collects transitions until none arrives for `QUIET`.
async fn collect(stream: &mut StateStream) -> Vec<bool> {
    let mut events = Vec::new();
    while let Ok(Some(online)) = tokio::time::timeout(QUIET, stream.recv()).await {
        events.push(online);
    }
    events
}

// ============================================================================
// Transition detection
// ============================================================================

mod transitions {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_sample_is_baseline() {
        let probe = ScriptedProbe::samples(&[false, false, true, true, false]);
        let mut stream = spawn(probe, FirstObservation::Baseline);

        assert_eq!(collect(&mut stream).await, vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_sample_is_reported() {
        let probe = ScriptedProbe::samples(&[false, false, true, true, false]);
        let mut stream = spawn(probe, FirstObservation::Report);

        assert_eq!(collect(&mut stream).await, vec![false, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn steady_state_produces_no_events() {
        let probe = ScriptedProbe::samples(&[true; 100]);
        let mut stream = spawn(probe.clone(), FirstObservation::Baseline);

        assert!(collect(&mut stream).await.is_empty());
        assert!(probe.calls() > 100);
    }

    #[tokio::test(start_paused = true)]
    async fn steady_state_reported_once() {
        let probe = ScriptedProbe::samples(&[true; 100]);
        let mut stream = spawn(probe, FirstObservation::Report);

        assert_eq!(collect(&mut stream).await, vec![true]);
    }

    #[tokio::test(start_paused = true)]
    async fn stream_trait_yields_transitions() {
        let probe = ScriptedProbe::samples(&[true, false, true]);
        let mut stream = spawn(probe, FirstObservation::Report);

        assert_eq!(stream.next().await, Some(true));
        assert_eq!(stream.next().await, Some(false));
        assert_eq!(stream.next().await, Some(true));
    }
}

// ============================================================================
// Probe failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn failure_does_not_stop_the_loop() {
        let probe = ScriptedProbe::new([Sample(false), Fail, Fail, Sample(true), Sample(true)]);
        let mut stream = spawn(probe, FirstObservation::Baseline);

        assert_eq!(collect(&mut stream).await, vec![true]);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_not_a_transition() {
        let probe = ScriptedProbe::new([Sample(true), Fail, Sample(true), Fail, Sample(true)]);
        let mut stream = spawn(probe, FirstObservation::Baseline);

        assert!(collect(&mut stream).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_before_first_sample_keeps_baseline_unknown() {
        let probe = ScriptedProbe::new([Fail, Fail, Sample(false), Sample(true)]);
        let mut stream = spawn(probe, FirstObservation::Report);

        assert_eq!(collect(&mut stream).await, vec![false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_device_never_reports() {
        let probe = ScriptedProbe::new([]);
        let mut stream = spawn(probe.clone(), FirstObservation::Report);

        assert!(collect(&mut stream).await.is_empty());
        assert!(probe.calls() > 1);
    }
}

// ============================================================================
// Delivery and lifecycle
// ============================================================================

mod delivery {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn unread_transition_drops_newer_ones() {
        let probe = ScriptedProbe::samples(&[false, true, false, true]);
        let mut stream = spawn(probe.clone(), FirstObservation::Report);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(probe.calls() > 4);

        assert_eq!(stream.try_recv(), Some(false));
        assert_eq!(stream.try_recv(), None);
        assert!(collect(&mut stream).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_transition_is_not_replayed() {
        let probe = ScriptedProbe::samples(&[false, true, true, true]);
        let mut stream = spawn(probe, FirstObservation::Report);

        tokio::time::sleep(Duration::from_secs(1)).await;

        // `true` was detected while `false` was still pending.
        assert_eq!(collect(&mut stream).await, vec![false]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_hung_probe() {
        let probe = ScriptedProbe::new([Hang]);
        let mut stream = spawn(probe, FirstObservation::Report);

        tokio::time::sleep(Duration::from_millis(50)).await;
        stream.shutdown();

        let end = tokio::time::timeout(Duration::from_secs(1), stream.recv()).await;
        assert_eq!(end, Ok(None));
        assert!(stream.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_interrupts_sleep() {
        let probe = ScriptedProbe::samples(&[true]);
        let config = WatchConfig::new()
            .with_interval(Duration::from_secs(3600))
            .with_first_observation(FirstObservation::Report);
        let mut stream = StateWatcher::new(probe, config).unwrap().spawn();

        assert_eq!(stream.recv().await, Some(true));
        stream.shutdown();

        let end = tokio::time::timeout(Duration::from_secs(1), stream.recv()).await;
        assert_eq!(end, Ok(None));
    }

    #[tokio::test(start_paused = true)]
    async fn external_token_stops_watcher() {
        let token = CancellationToken::new();
        let probe = ScriptedProbe::samples(&[true, true]);
        let mut stream = StateWatcher::new(probe, config(FirstObservation::Report))
            .unwrap()
            .spawn_with_token(token.clone());

        assert_eq!(stream.recv().await, Some(true));
        token.cancel();
        assert_eq!(stream.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_one_stream_leaves_shared_token_alive() {
        let shutdown = CancellationToken::new();
        let first = StateWatcher::new(
            ScriptedProbe::samples(&[true]),
            config(FirstObservation::Report),
        )
        .unwrap()
        .spawn_with_token(shutdown.clone());
        let mut second = StateWatcher::new(
            ScriptedProbe::samples(&[true, true, false]),
            config(FirstObservation::Report),
        )
        .unwrap()
        .spawn_with_token(shutdown.clone());

        assert_eq!(second.recv().await, Some(true));
        drop(first);

        assert!(!shutdown.is_cancelled());
        assert_eq!(second.recv().await, Some(false));

        shutdown.cancel();
        assert_eq!(second.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stream_shutdown_leaves_shared_token_alive() {
        let shutdown = CancellationToken::new();
        let stream = StateWatcher::new(ScriptedProbe::new([]), config(FirstObservation::Baseline))
            .unwrap()
            .spawn_with_token(shutdown.clone());

        stream.shutdown();
        assert!(stream.cancellation_token().is_cancelled());
        assert!(!shutdown.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_stream_stops_polling() {
        let probe = ScriptedProbe::new([]);
        let stream = spawn(probe.clone(), FirstObservation::Baseline);

        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(stream);
        tokio::time::sleep(Duration::from_millis(50)).await;

        let calls = probe.calls();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(probe.calls(), calls);
    }

    #[test]
    fn zero_interval_rejected() {
        let probe = ScriptedProbe::new([]);
        let result = StateWatcher::new(probe, WatchConfig::new().with_interval(Duration::ZERO));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::ZeroInterval))
        ));
    }
}

// ============================================================================
// Watch groups
// ============================================================================

mod group {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn events_are_tagged_with_device_name() {
        let mut group = WatchGroup::new();
        let mut events = group.subscribe();

        group
            .add(
                "living room",
                ScriptedProbe::samples(&[false, true]),
                config(FirstObservation::Baseline),
            )
            .unwrap();
        group
            .add(
                "bedroom",
                ScriptedProbe::samples(&[true, true, false]),
                config(FirstObservation::Baseline),
            )
            .unwrap();

        let mut received = vec![events.recv().await.unwrap(), events.recv().await.unwrap()];
        received.sort_by(|a, b| a.device().cmp(b.device()));

        assert_eq!(
            received,
            vec![
                StateChangeEvent::new("bedroom", false),
                StateChangeEvent::new("living room", true),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn per_device_order_is_preserved() {
        let mut group = WatchGroup::new();
        let mut events = group.subscribe();

        group
            .add(
                "stb",
                ScriptedProbe::samples(&[false, true, false, true]),
                config(FirstObservation::Report),
            )
            .unwrap();

        let mut states = Vec::new();
        for _ in 0..4 {
            states.push(events.recv().await.unwrap().is_online());
        }
        assert_eq!(states, vec![false, true, false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_name_rejected() {
        let mut group = WatchGroup::new();
        group
            .add("stb", ScriptedProbe::new([]), WatchConfig::new())
            .unwrap();

        let result = group.add("stb", ScriptedProbe::new([]), WatchConfig::new());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::DuplicateDevice(name))) if name == "stb"
        ));
        assert_eq!(group.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn remove_stops_device() {
        let mut group = WatchGroup::new();
        let probe = ScriptedProbe::new([]);
        group
            .add("stb", probe.clone(), config(FirstObservation::Baseline))
            .unwrap();
        group
            .add("tv", ScriptedProbe::new([]), config(FirstObservation::Baseline))
            .unwrap();

        assert!(group.remove("stb"));
        assert!(!group.remove("stb"));
        assert_eq!(group.device_names(), vec!["tv"]);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let calls = probe.calls();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(probe.calls(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_and_wait_finishes() {
        let mut group = WatchGroup::new();
        group
            .add("stb", ScriptedProbe::new([Hang]), WatchConfig::new())
            .unwrap();

        let done = tokio::time::timeout(Duration::from_secs(1), group.shutdown_and_wait()).await;
        assert!(done.is_ok());
    }
}
