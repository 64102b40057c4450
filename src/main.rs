use std::env;

use anyhow::{Context, Result};
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use finqa_eval::engine::dialogue_processor::load_dataset;
use finqa_eval::engine::evaluator::Evaluator;
use finqa_eval::engine::llm_client::OpenAiClient;
use finqa_eval::engine::prompt_builder::PromptBuilder;
use finqa_eval::error::InitError;
use finqa_eval::model::evaluation_results::EvaluationResults;
use finqa_eval::ui::settings::Settings;
use finqa_eval::ui::settings_io::{load_settings, save_summary};
use finqa_eval::ui::transcript::Transcript;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finqa_eval=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = load_settings();
    let api_key = env::var("OPENAI_API_KEY").map_err(|_| InitError::MissingApiKey)?;
    let prompts = PromptBuilder::load(&settings.prompt_path)?;
    let client = OpenAiClient::new(
        settings.api_base_url.as_str(),
        api_key,
        settings.model_name.as_str(),
        settings.temperature,
        settings.request_timeout(),
    )?;

    let mut transcript = Transcript::create(&settings.results_file).with_context(|| {
        format!("Failed to open results file: {}", settings.results_file.display())
    })?;

    let outcome = run(&settings, client, prompts, &mut transcript);
    if let Err(e) = &outcome {
        error!("Evaluation failed: {e:#}");
        transcript.line(format!("Evaluation failed: {e:?}"));
    }
    transcript.finish()?;

    outcome.map(|_| ())
}

fn run(
    settings: &Settings,
    client: OpenAiClient,
    prompts: PromptBuilder,
    transcript: &mut Transcript,
) -> Result<EvaluationResults> {
    let records = load_dataset(&settings.data_path)?;
    let evaluator = Evaluator::new(settings.clone(), client, prompts);
    let results = evaluator.evaluate(records, transcript)?;

    if let Some(path) = &settings.summary_file {
        save_summary(path, &results)?;
        transcript.line(format!("Summary written to: {}", path.display()));
    }
    transcript.blank();
    transcript.line(format!("Results saved to: {}", settings.results_file.display()));

    Ok(results)
}
