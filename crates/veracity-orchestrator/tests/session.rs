//! End-to-end sessions against a scripted engine and mock collaborators

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use veracity_domain::traits::{EngineMessage, ToolInvocation, ToolResponse};
use veracity_domain::{CorpusDocument, ToolError, WebHit};
use veracity_evidence::{EvidenceConfig, EvidenceGatherer, FakeClock};
use veracity_extractor::ExtractorConfig;
use veracity_orchestrator::{
    ExhaustionReason, Orchestrator, OrchestratorError, SessionConfig, SessionOutcome, Toolbox,
};
use veracity_providers::mock::{MockCorpus, MockDocuments, MockFetcher, MockSearch, ScriptedEngine};

const PAPER: &str = "https://arxiv.org/pdf/1234.5678";
const BLOG: &str = "https://blog.example.net/turbines";

struct Fixture {
    search: MockSearch,
    corpus: MockCorpus,
    fetcher: MockFetcher,
    documents: MockDocuments,
}

impl Fixture {
    fn new() -> Self {
        Self::with_fetcher(MockFetcher::new())
    }

    fn with_fetcher(fetcher: MockFetcher) -> Self {
        let search = MockSearch::new().with_default_hits(vec![WebHit {
            title: "Turbines and birds".to_string(),
            url: BLOG.to_string(),
            snippet: "Popular write-up".to_string(),
        }]);
        fetcher.add_page(BLOG, Some("Blog"), "Turbines are said to kill birds.");
        let documents = MockDocuments::new();
        documents.add_document(PAPER, "Domestic cats kill billions of birds every year.");
        Self {
            search,
            corpus: MockCorpus::new(),
            fetcher,
            documents,
        }
    }

    fn toolbox(&self) -> Toolbox {
        let gatherer = EvidenceGatherer::with_clock(
            Arc::new(self.search.clone()),
            Arc::new(self.corpus.clone()),
            Arc::new(self.documents.clone()),
            EvidenceConfig::default(),
            Arc::new(FakeClock::new()),
        )
        .unwrap();
        Toolbox::from_parts(
            Arc::new(self.search.clone()),
            Arc::new(self.fetcher.clone()),
            Arc::new(self.documents.clone()),
            Arc::new(gatherer),
            ExtractorConfig::default(),
        )
        .unwrap()
    }

    fn orchestrator(&self, engine: &ScriptedEngine, config: SessionConfig) -> Orchestrator {
        Orchestrator::new(Arc::new(engine.clone()), self.toolbox(), config).unwrap()
    }
}

fn call(name: &str, args: Value) -> ToolInvocation {
    ToolInvocation::new(name, args)
}

fn read_pdf(url: &str) -> ToolInvocation {
    call("read_pdf", json!({ "url": url }))
}

fn read_page(url: &str) -> ToolInvocation {
    call("read_web_page", json!({ "url": url }))
}

fn report(sources: &str) -> ToolInvocation {
    call(
        "emit_report",
        json!({
            "sections": [
                { "heading": "Claim", "text": "Wind turbines kill more birds than cats" },
                { "heading": "Judgement", "text": "False" },
                { "heading": "Summary", "text": "Cats kill far more birds than turbines." },
                { "heading": "Sources", "text": sources },
            ]
        }),
    )
}

/// Tool results sent with the engine's `n`th message (0-based)
fn results(engine: &ScriptedEngine, n: usize) -> Vec<ToolResponse> {
    match &engine.messages()[n] {
        EngineMessage::ToolResults(results) => results.clone(),
        other => panic!("expected tool results, got {:?}", other),
    }
}

#[tokio::test]
async fn test_report_accepted_after_primary_source() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![read_pdf(PAPER)])
        .then_call(vec![report(&format!("- Loss et al. {}", PAPER))]);

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("Wind turbines kill more birds than cats")
        .await
        .unwrap();

    let SessionOutcome::Accepted(report) = result.outcome else {
        panic!("expected an accepted report");
    };
    assert_eq!(report.sections().len(), 4);
    assert!(report.to_string().contains("## Judgement"));
    assert_eq!(result.summary.turns, 2);
    assert_eq!(result.summary.tool_calls, 1);
    assert_eq!(result.summary.primary_sources, vec![PAPER.to_string()]);

    let pdf = &results(&engine, 1)[0];
    assert!(!pdf.is_error);
    assert!(pdf.content.contains("Domestic cats kill billions"));
    assert!(engine.system_instruction().unwrap().contains("emit_report"));
}

#[tokio::test]
async fn test_premature_report_is_rejected() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![report(&format!("- {}", PAPER))])
        .then_call(vec![read_pdf(PAPER)])
        .then_call(vec![report(&format!("- {}", PAPER))]);

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("Wind turbines kill more birds than cats")
        .await
        .unwrap();

    let rejected = &results(&engine, 1)[0];
    assert!(rejected.is_error);
    assert!(rejected.content.starts_with("ValidationError: Report rejected"));
    assert!(rejected.content.contains("no primary source has been read yet"));
    assert!(matches!(result.outcome, SessionOutcome::Accepted(_)));
    assert_eq!(result.summary.turns, 3);
}

#[tokio::test]
async fn test_missing_section_is_rejected_without_ending_session() {
    let f = Fixture::new();
    let incomplete = call(
        "emit_report",
        json!({
            "sections": [
                { "heading": "Claim", "text": "Wind turbines kill more birds than cats" },
                { "heading": "Judgement", "text": "False" },
                { "heading": "Sources", "text": PAPER },
            ]
        }),
    );
    let engine = ScriptedEngine::new()
        .then_call(vec![read_pdf(PAPER)])
        .then_call(vec![incomplete])
        .then_call(vec![report(PAPER)]);

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap();

    let rejected = &results(&engine, 2)[0];
    assert!(rejected.is_error);
    assert!(rejected.content.contains("missing section 'Summary'"));
    assert!(matches!(result.outcome, SessionOutcome::Accepted(_)));
}

#[tokio::test]
async fn test_popular_coverage_cannot_be_cited() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![call("search_web", json!({ "query": "turbines birds" }))])
        .then_call(vec![read_pdf(PAPER)])
        .then_call(vec![report(&format!("- {}\n- Blog {}", PAPER, BLOG))]);

    let err = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap_err();

    let rejected = &results(&engine, 3)[0];
    assert!(rejected.is_error);
    assert!(rejected.content.contains("is popular coverage"));
    assert_eq!(
        err,
        OrchestratorError::Exhausted(ExhaustionReason::NoToolCalls)
    );
}

#[tokio::test]
async fn test_duplicate_urls_are_read_once() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![
            read_page(BLOG),
            read_page(&format!("{}#comments", BLOG)),
        ])
        .then_call(vec![read_page(BLOG)]);

    let err = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap_err();

    assert_eq!(f.fetcher.fetch_count(BLOG), 1);
    assert_eq!(f.fetcher.call_count(), 1);

    let first = results(&engine, 1);
    assert!(first[0].content.contains("Turbines are said to kill birds."));
    assert!(first[1].content.starts_with("Already visited"));
    assert!(!first[1].is_error);
    assert!(results(&engine, 2)[0].content.starts_with("Already visited"));
    assert_eq!(
        err,
        OrchestratorError::Exhausted(ExhaustionReason::NoToolCalls)
    );
}

#[tokio::test]
async fn test_failed_fetch_is_not_retried() {
    let f = Fixture::new();
    f.fetcher
        .add_error("https://down.example.com", ToolError::Network("connection reset".into()));
    let engine = ScriptedEngine::new()
        .then_call(vec![read_page("https://down.example.com")])
        .then_call(vec![read_page("https://down.example.com")]);

    let _ = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await;

    assert_eq!(f.fetcher.fetch_count("https://down.example.com"), 1);
    let failed = &results(&engine, 1)[0];
    assert!(failed.is_error);
    assert_eq!(failed.content, "NetworkError: connection reset");

    let repeated = &results(&engine, 2)[0];
    assert!(repeated.content.starts_with("Already visited https://down.example.com"));
    assert!(repeated.content.contains("whether it succeeded or failed"));
    assert!(!repeated.content.contains("Use the earlier result"));
}

#[tokio::test]
async fn test_accepted_report_skips_rest_of_batch() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![read_pdf(PAPER)])
        .then_call(vec![report(PAPER), read_page(BLOG)]);

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap();

    assert!(matches!(result.outcome, SessionOutcome::Accepted(_)));
    assert_eq!(f.fetcher.fetch_count(BLOG), 0);
}

#[tokio::test]
async fn test_max_turns_exhaustion() {
    let f = Fixture::new();
    let mut engine = ScriptedEngine::new();
    for i in 0..5 {
        engine = engine.then_call(vec![call("search_web", json!({ "query": format!("q{}", i) }))]);
    }
    let config = SessionConfig {
        max_turns: 3,
        ..Default::default()
    };

    let err = f
        .orchestrator(&engine, config)
        .verify("claim")
        .await
        .unwrap_err();

    assert_eq!(err, OrchestratorError::Exhausted(ExhaustionReason::MaxTurns(3)));
    assert_eq!(engine.turns(), 3);
    assert_eq!(f.search.call_count(), 3);
    assert!(err.to_string().contains("3 turns"));
}

#[tokio::test]
async fn test_text_reply_in_structured_mode_is_exhaustion() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new().then_text("I believe the claim is false.");

    let err = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrchestratorError::Exhausted(ExhaustionReason::NoToolCalls)
    );
}

#[tokio::test]
async fn test_batch_without_results_is_exhaustion() {
    let f = Fixture::new();
    f.search.add_results("nothing here", vec![]);
    let engine = ScriptedEngine::new()
        .then_call(vec![call("search_web", json!({ "query": "nothing here" }))])
        .then_call(vec![read_page(BLOG)]);

    let err = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap_err();

    assert_eq!(err, OrchestratorError::Exhausted(ExhaustionReason::NoResults));
    assert_eq!(engine.turns(), 1);
}

#[tokio::test]
async fn test_missing_credential_disables_tool() {
    let f = Fixture::new();
    f.search
        .fail_all(ToolError::Credential("TAVILY_API_KEY is not set".into()));
    let engine = ScriptedEngine::new()
        .then_call(vec![call("search_web", json!({ "query": "first" }))])
        .then_call(vec![
            call("search_web", json!({ "query": "second" })),
            read_page(BLOG),
        ]);

    let _ = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await;

    assert_eq!(f.search.call_count(), 1);
    let first = &results(&engine, 1)[0];
    assert!(first.is_error);
    assert!(first.content.starts_with("CredentialError: TAVILY_API_KEY is not set"));

    let second = results(&engine, 2);
    assert!(second[0].is_error);
    assert!(second[0].content.starts_with("ToolUnavailable"));
    assert!(!second[1].is_error);
}

#[tokio::test]
async fn test_results_keep_request_order() {
    let f = Fixture::with_fetcher(MockFetcher::new().with_delay(Duration::from_millis(20)));
    let urls = ["https://a.example.com", "https://b.example.com", "https://c.example.com"];
    for url in urls {
        f.fetcher.add_page(url, None, format!("text of {}", url));
    }
    let engine = ScriptedEngine::new().then_call(urls.iter().map(|u| read_page(u)).collect());

    let _ = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await;

    let sent = results(&engine, 1);
    assert_eq!(sent.len(), 3);
    for (response, url) in sent.iter().zip(urls) {
        assert_eq!(response.name, "read_web_page");
        assert!(response.content.contains(&format!("text of {}", url)));
    }
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new().then_call(vec![read_page(BLOG)]);
    let token = CancellationToken::new();
    token.cancel();

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify_with_cancel("claim", token)
        .await
        .unwrap();

    assert_eq!(result.outcome, SessionOutcome::Cancelled);
    assert_eq!(engine.turns(), 0);
    assert_eq!(result.summary.turns, 0);
}

#[tokio::test]
async fn test_cancelled_during_tools_stops_at_turn_boundary() {
    let f = Fixture::with_fetcher(MockFetcher::new().with_delay(Duration::from_millis(200)));
    let engine = ScriptedEngine::new()
        .then_call(vec![read_page(BLOG)])
        .then_call(vec![read_pdf(PAPER)]);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify_with_cancel("claim", token)
        .await
        .unwrap();

    assert_eq!(result.outcome, SessionOutcome::Cancelled);
    assert_eq!(engine.turns(), 1);
    assert_eq!(f.fetcher.fetch_count(BLOG), 1);
    assert_eq!(f.documents.call_count(), 0);
}

#[tokio::test]
async fn test_unstructured_mode_accepts_text_reply() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![read_pdf(PAPER)])
        .then_text("Judgement: False");
    let config = SessionConfig {
        structured_report: false,
        ..Default::default()
    };

    let result = f
        .orchestrator(&engine, config)
        .verify("claim")
        .await
        .unwrap();

    assert_eq!(
        result.outcome,
        SessionOutcome::Unstructured("Judgement: False".to_string())
    );
    assert!(!engine.declared_tools().contains(&"emit_report".to_string()));
    assert_eq!(engine.declared_tools().len(), 5);
}

#[tokio::test]
async fn test_unknown_tool_is_reported_to_engine() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new()
        .then_call(vec![call("delete_everything", json!({})), read_page(BLOG)]);

    let _ = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await;

    let sent = results(&engine, 1);
    assert!(sent[0].is_error);
    assert_eq!(sent[0].name, "delete_everything");
    assert!(sent[0].content.contains("Unknown tool 'delete_everything'"));
    assert!(!sent[1].is_error);
}

#[tokio::test]
async fn test_slow_tool_times_out() {
    let f = Fixture::with_fetcher(MockFetcher::new().with_delay(Duration::from_millis(1500)));
    let engine = ScriptedEngine::new().then_call(vec![read_page(BLOG)]);
    let config = SessionConfig {
        tool_timeout_secs: 1,
        ..Default::default()
    };

    let _ = f.orchestrator(&engine, config).verify("claim").await;

    let sent = &results(&engine, 1)[0];
    assert!(sent.is_error);
    assert_eq!(sent.content, "NetworkError: read_web_page timed out after 1s");
}

fn slow_corpus_fixture(delay: Duration) -> Fixture {
    let mut f = Fixture::new();
    f.documents = MockDocuments::new().with_delay(delay);
    let papers: Vec<CorpusDocument> = (1..=3)
        .map(|i| {
            let pdf = format!("https://arxiv.org/pdf/2401.0000{}", i);
            f.documents.add_document(&pdf, "Cats kill birds.");
            CorpusDocument {
                title: format!("Paper {}", i),
                authors: vec![],
                source_id: Some(format!("2401.0000{}", i)),
                pdf_url: Some(pdf),
                url: Some(format!("https://arxiv.org/abs/2401.0000{}", i)),
                abstract_text: String::new(),
            }
        })
        .collect();
    f.corpus = MockCorpus::new().with_default_documents(papers);
    f
}

#[tokio::test]
async fn test_fact_check_outlives_single_request_timeout() {
    // Each download is under the per-request limit; the three together are not.
    let f = slow_corpus_fixture(Duration::from_millis(500));
    let engine = ScriptedEngine::new().then_call(vec![call(
        "fact_check",
        json!({ "statement": "Domestic cats kill billions of birds every year" }),
    )]);
    let config = SessionConfig {
        tool_timeout_secs: 1,
        composite_tool_timeout_secs: 10,
        ..Default::default()
    };

    let _ = f.orchestrator(&engine, config).verify("claim").await;

    let checked = &results(&engine, 1)[0];
    assert!(!checked.is_error, "{}", checked.content);
    assert_eq!(f.documents.call_count(), 3);
    assert!(checked.content.contains("2401.00003"));
}

#[tokio::test]
async fn test_fact_check_bounded_by_composite_timeout() {
    let f = slow_corpus_fixture(Duration::from_millis(500));
    let engine = ScriptedEngine::new().then_call(vec![call(
        "fact_check",
        json!({ "statement": "Domestic cats kill billions of birds every year" }),
    )]);
    let config = SessionConfig {
        tool_timeout_secs: 1,
        composite_tool_timeout_secs: 1,
        ..Default::default()
    };

    let _ = f.orchestrator(&engine, config).verify("claim").await;

    let checked = &results(&engine, 1)[0];
    assert!(checked.is_error);
    assert_eq!(checked.content, "NetworkError: fact_check timed out after 1s");
}

#[tokio::test]
async fn test_engine_failure_ends_session() {
    let f = Fixture::new();
    let engine = ScriptedEngine::new().then_error(ToolError::Network("HTTP 503".into()));

    let err = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Engine(msg) if msg.contains("HTTP 503")));
}

#[tokio::test]
async fn test_long_results_are_truncated() {
    let f = Fixture::new();
    f.fetcher
        .add_page("https://long.example.com", None, "word ".repeat(200));
    let engine = ScriptedEngine::new().then_call(vec![read_page("https://long.example.com")]);
    let config = SessionConfig {
        max_tool_result_chars: 100,
        ..Default::default()
    };

    let _ = f.orchestrator(&engine, config).verify("claim").await;

    let sent = &results(&engine, 1)[0];
    assert!(sent.content.ends_with("[truncated]"));
    assert!(sent.content.chars().count() < 150);
}

#[tokio::test]
async fn test_fact_check_unlocks_report() {
    let f = Fixture::new();
    let statement = "Domestic cats kill billions of birds every year";
    f.corpus.add_results(
        statement,
        vec![CorpusDocument {
            title: "Bird mortality".to_string(),
            authors: vec!["S. Loss".to_string()],
            source_id: Some("1234.5678".to_string()),
            pdf_url: Some(PAPER.to_string()),
            url: Some("https://arxiv.org/abs/1234.5678".to_string()),
            abstract_text: "Cats and birds".to_string(),
        }],
    );
    let engine = ScriptedEngine::new()
        .then_call(vec![call("fact_check", json!({ "statement": statement }))])
        .then_call(vec![report("- https://arxiv.org/abs/1234.5678")]);

    let result = f
        .orchestrator(&engine, SessionConfig::default())
        .verify("claim")
        .await
        .unwrap();

    let checked = &results(&engine, 1)[0];
    assert!(!checked.is_error);
    assert!(checked.content.contains("\"High\""));
    assert!(matches!(result.outcome, SessionOutcome::Accepted(_)));
    assert_eq!(
        result.summary.primary_sources,
        vec!["https://arxiv.org/abs/1234.5678".to_string()]
    );
    assert!(result.summary.popular_coverage.contains(&BLOG.to_string()));
}
