use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use regime_lens::{
    analysis::{
        AnalysisErrorKind, AnalysisOrchestrator, AnalysisRequest, AnalysisResult, AnalysisStatus,
        RunOutcome, SentimentLabel,
        error::{AnalysisError, network_error, server_error},
        testing::{HookReasoningBoundary, boxed, sample_result},
    },
    catalog::SignalKey,
    classifier::{gauge_rotation_degrees, sentiment_label},
    selection::SelectionStore,
};
use tokio::sync::oneshot;

type Gate = oneshot::Receiver<Result<AnalysisResult, AnalysisError>>;

fn selection_with(ticker: &str) -> SelectionStore {
    let mut store = SelectionStore::new();
    store.toggle_signal(SignalKey::UsRecession2026);
    store
        .toggle_company(ticker)
        .expect("ticker should be accepted");
    store
}

fn orchestrator_returning(
    outcome: Result<AnalysisResult, AnalysisError>,
) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(Arc::new(HookReasoningBoundary::returning(outcome)))
}

#[tokio::test]
async fn given_fresh_orchestrator_when_inspected_then_session_is_idle() {
    let orchestrator = orchestrator_returning(Ok(sample_result(50.0)));

    assert_eq!(orchestrator.status(), AnalysisStatus::Idle);
    assert!(orchestrator.result().is_none());
    assert!(orchestrator.error().is_none());
    assert!(orchestrator.user_message().is_none());
}

#[tokio::test]
async fn given_recession_and_nvda_when_run_then_bullish_result_is_recorded() {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let hook_captured = Arc::clone(&captured);
    let boundary = HookReasoningBoundary::new(Arc::new(move |request: AnalysisRequest| {
        hook_captured
            .lock()
            .expect("capture lock")
            .push(request);
        boxed(async { Ok(sample_result(72.0)) })
    }));
    let orchestrator = AnalysisOrchestrator::new(Arc::new(boundary));

    let outcome = orchestrator.run(&selection_with("NVDA")).await;

    assert_eq!(outcome, RunOutcome::Succeeded { run_id: 1 });
    assert_eq!(orchestrator.status(), AnalysisStatus::Succeeded);
    let result = orchestrator.result().expect("result should be present");
    assert_eq!(result.market_sentiment.score, 72.0);
    assert_eq!(sentiment_label(result.market_sentiment.score), SentimentLabel::Bullish);
    assert!((gauge_rotation_degrees(result.market_sentiment.score) - 39.6).abs() < 1e-9);

    let requests = captured.lock().expect("capture lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].events, vec![SignalKey::UsRecession2026]);
    assert_eq!(requests[0].companies, vec!["NVDA".to_string()]);
}

#[tokio::test]
async fn given_empty_selection_when_run_then_boundary_receives_empty_lists() {
    let captured = Arc::new(Mutex::new(None));
    let hook_captured = Arc::clone(&captured);
    let boundary = HookReasoningBoundary::new(Arc::new(move |request: AnalysisRequest| {
        *hook_captured.lock().expect("capture lock") = Some(request);
        boxed(async { Ok(sample_result(50.0)) })
    }));
    let orchestrator = AnalysisOrchestrator::new(Arc::new(boundary));

    let outcome = orchestrator.run(&SelectionStore::new()).await;

    assert!(matches!(outcome, RunOutcome::Succeeded { .. }));
    let request = captured
        .lock()
        .expect("capture lock")
        .clone()
        .expect("boundary should be called");
    assert!(request.events.is_empty());
    assert!(request.companies.is_empty());
}

#[tokio::test]
async fn given_score_out_of_range_when_run_then_session_fails_with_schema_error() {
    let orchestrator = orchestrator_returning(Ok(sample_result(140.0)));

    let outcome = orchestrator.run(&selection_with("NVDA")).await;

    let RunOutcome::Failed { error, .. } = outcome else {
        panic!("out-of-range score must fail, got {outcome:?}");
    };
    assert_eq!(error.kind, AnalysisErrorKind::Schema);
    assert!(error.message.contains("market_sentiment.score"));
    assert_eq!(orchestrator.status(), AnalysisStatus::Failed);
    assert!(orchestrator.result().is_none());
    assert!(orchestrator.user_message().is_some());
}

#[tokio::test]
async fn given_nan_confidence_when_run_then_session_fails_with_schema_error() {
    let mut result = sample_result(60.0);
    if let Some(outlook) = result.asset_outlook.get_mut("NVDA") {
        outlook.confidence = f64::NAN;
    }
    let orchestrator = orchestrator_returning(Ok(result));

    orchestrator.run(&selection_with("NVDA")).await;

    let error = orchestrator.error().expect("error should be recorded");
    assert_eq!(error.kind, AnalysisErrorKind::Schema);
}

#[tokio::test]
async fn given_network_failure_when_run_then_user_message_is_non_technical() {
    let orchestrator =
        orchestrator_returning(Err(network_error("tcp connect error: Connection refused")));

    orchestrator.run(&selection_with("NVDA")).await;

    let message = orchestrator.user_message().expect("message should exist");
    assert!(!message.contains("tcp"));
    assert_eq!(
        orchestrator.error().map(|error| error.kind),
        Some(AnalysisErrorKind::Network)
    );
}

#[tokio::test]
async fn given_failed_run_when_rerun_successfully_then_error_is_cleared() {
    let calls = Arc::new(AtomicUsize::new(0));
    let hook_calls = Arc::clone(&calls);
    let boundary = HookReasoningBoundary::new(Arc::new(move |_request| {
        let call = hook_calls.fetch_add(1, Ordering::SeqCst);
        boxed(async move {
            if call == 0 {
                Err(server_error("reasoning service returned status 500").with_http_status(500))
            } else {
                Ok(sample_result(45.0))
            }
        })
    }));
    let orchestrator = AnalysisOrchestrator::new(Arc::new(boundary));
    let selection = selection_with("NVDA");

    let first = orchestrator.run(&selection).await;
    assert!(matches!(first, RunOutcome::Failed { run_id: 1, .. }));
    assert_eq!(
        orchestrator.error().and_then(|error| error.http_status),
        Some(500)
    );

    let second = orchestrator.run(&selection).await;
    assert_eq!(second, RunOutcome::Succeeded { run_id: 2 });
    assert!(orchestrator.error().is_none());
    assert_eq!(orchestrator.status(), AnalysisStatus::Succeeded);
}

#[tokio::test]
async fn given_run_when_observed_then_running_precedes_terminal_state() {
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let release_rx = Arc::new(Mutex::new(Some(release_rx)));
    let boundary = HookReasoningBoundary::new(Arc::new(move |_request| {
        let gate = release_rx.lock().expect("gate lock").take();
        boxed(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(sample_result(30.0))
        })
    }));
    let orchestrator = Arc::new(AnalysisOrchestrator::new(Arc::new(boundary)));
    let mut session_rx = orchestrator.subscribe();

    let runner = {
        let orchestrator = Arc::clone(&orchestrator);
        let selection = selection_with("XOM");
        tokio::spawn(async move { orchestrator.run(&selection).await })
    };

    session_rx
        .wait_for(|session| session.is_running())
        .await
        .expect("session should enter running");
    assert!(orchestrator.result().is_none());

    release_tx.send(()).expect("runner should still wait");
    let outcome = runner.await.expect("runner should not panic");

    assert_eq!(outcome, RunOutcome::Succeeded { run_id: 1 });
    assert_eq!(orchestrator.status(), AnalysisStatus::Succeeded);
}

#[tokio::test]
async fn given_run_in_flight_when_new_run_issued_then_later_run_determines_result() {
    let gates: Arc<Mutex<HashMap<String, Gate>>> = Arc::new(Mutex::new(HashMap::new()));
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    {
        let mut gates = gates.lock().expect("gates lock");
        gates.insert("NVDA".to_string(), first_rx);
        gates.insert("MSFT".to_string(), second_rx);
    }

    let hook_gates = Arc::clone(&gates);
    let boundary = HookReasoningBoundary::new(Arc::new(move |request: AnalysisRequest| {
        let gate = request
            .companies
            .first()
            .and_then(|ticker| hook_gates.lock().expect("gates lock").remove(ticker));
        boxed(async move {
            match gate {
                Some(gate) => gate
                    .await
                    .unwrap_or_else(|_| Err(network_error("gate dropped"))),
                None => Err(network_error("no gate registered")),
            }
        })
    }));
    let orchestrator = Arc::new(AnalysisOrchestrator::new(Arc::new(boundary)));
    let mut session_rx = orchestrator.subscribe();

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        let selection = selection_with("NVDA");
        tokio::spawn(async move { orchestrator.run(&selection).await })
    };
    session_rx
        .wait_for(|session| session.run_id() == 1 && session.is_running())
        .await
        .expect("first run should start");

    let second = {
        let orchestrator = Arc::clone(&orchestrator);
        let selection = selection_with("MSFT");
        tokio::spawn(async move { orchestrator.run(&selection).await })
    };
    session_rx
        .wait_for(|session| session.run_id() == 2)
        .await
        .expect("second run should start");

    // The first gate may already be gone if its run was cancelled before
    // reaching the boundary.
    let _ = first_tx.send(Ok(sample_result(10.0)));
    let first_outcome = first.await.expect("first run should not panic");
    assert_eq!(first_outcome, RunOutcome::Superseded { run_id: 1 });
    assert_eq!(orchestrator.status(), AnalysisStatus::Running);

    second_tx
        .send(Ok(sample_result(72.0)))
        .expect("second run should still wait");
    let second_outcome = second.await.expect("second run should not panic");

    assert_eq!(second_outcome, RunOutcome::Succeeded { run_id: 2 });
    let result = orchestrator.result().expect("result should be present");
    assert_eq!(result.market_sentiment.score, 72.0);
    assert_eq!(orchestrator.session().run_id(), 2);
}

#[tokio::test]
async fn given_caller_timeout_when_run_dropped_then_session_fails_with_network_error() {
    let boundary = HookReasoningBoundary::new(Arc::new(|_request: AnalysisRequest| {
        boxed(std::future::pending::<Result<AnalysisResult, AnalysisError>>())
    }));
    let orchestrator = AnalysisOrchestrator::new(Arc::new(boundary));

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        orchestrator.run(&SelectionStore::new()),
    )
    .await;

    assert!(timed_out.is_err(), "boundary never resolves");
    assert_eq!(orchestrator.status(), AnalysisStatus::Failed);
    let error = orchestrator.error().expect("cancellation should be recorded");
    assert_eq!(error.kind, AnalysisErrorKind::Network);
    assert!(error.message.contains("cancelled"));
    assert!(orchestrator.user_message().is_some());
}

#[tokio::test]
async fn given_caller_timeout_when_rerun_then_next_run_succeeds() {
    let calls = Arc::new(AtomicUsize::new(0));
    let hook_calls = Arc::clone(&calls);
    let boundary = HookReasoningBoundary::new(Arc::new(move |_request: AnalysisRequest| {
        if hook_calls.fetch_add(1, Ordering::SeqCst) == 0 {
            boxed(std::future::pending::<Result<AnalysisResult, AnalysisError>>())
        } else {
            boxed(async { Ok(sample_result(66.0)) })
        }
    }));
    let orchestrator = AnalysisOrchestrator::new(Arc::new(boundary));
    let selection = selection_with("NVDA");

    let _ = tokio::time::timeout(Duration::from_millis(50), orchestrator.run(&selection)).await;
    let outcome = orchestrator.run(&selection).await;

    assert_eq!(outcome, RunOutcome::Succeeded { run_id: 2 });
    assert!(orchestrator.error().is_none());
}

#[tokio::test]
async fn given_each_bounded_field_out_of_range_when_run_then_schema_error_names_it() {
    let cases: [(&str, fn(&mut AnalysisResult)); 7] = [
        ("market_sentiment.score", |result| {
            result.market_sentiment.score = -0.5;
        }),
        ("crowd_signals.recession_probability", |result| {
            result.crowd_signals.recession_probability = 1.2;
        }),
        ("asset_outlook.NVDA.confidence", |result| {
            if let Some(outlook) = result.asset_outlook.get_mut("NVDA") {
                outlook.confidence = 1.01;
            }
        }),
        ("risk_indicators.bubble_risk", |result| {
            result.risk_indicators.bubble_risk = 101.0;
        }),
        ("risk_indicators.market_fragility", |result| {
            result.risk_indicators.market_fragility = -1.0;
        }),
        ("risk_indicators.upside_probability", |result| {
            result.risk_indicators.upside_probability = 101.0;
        }),
        ("risk_indicators.upside_probability", |result| {
            result.risk_indicators.upside_probability = f64::INFINITY;
        }),
    ];

    for (field, corrupt) in cases {
        let mut result = sample_result(50.0);
        corrupt(&mut result);
        let orchestrator = orchestrator_returning(Ok(result));

        let outcome = orchestrator.run(&selection_with("NVDA")).await;

        let RunOutcome::Failed { error, .. } = outcome else {
            panic!("{field}: out-of-range value must fail, got {outcome:?}");
        };
        assert_eq!(error.kind, AnalysisErrorKind::Schema, "{field}");
        assert!(
            error.message.contains(field),
            "{field}: unexpected message {}",
            error.message
        );
        assert_eq!(orchestrator.status(), AnalysisStatus::Failed, "{field}");
        assert!(orchestrator.result().is_none(), "{field}");
    }
}
