use clap::Subcommand;
use estuda_core::{
    band_for, overview, simulado_overall_accuracy, stats::round1, subject_summaries, Settings,
    Store,
};

use super::load_or_warn;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Global totals across all subjects
    Overview,
    /// Per-subject statistics, ranked by accuracy
    Subjects,
    /// Per-simulado overall accuracy
    Simulados,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let settings = Settings::load_or_default(&store);
    let colors = settings.performance_colors;

    match action {
        StatsAction::Overview => {
            let subjects = load_or_warn("subjects", store.subjects());
            let view = overview(&subjects);
            let report = serde_json::json!({
                "band": band_for(view.overall_accuracy, &colors),
                "overview": view,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        StatsAction::Subjects => {
            let subjects = load_or_warn("subjects", store.subjects());
            let rows: Vec<serde_json::Value> = subject_summaries(&subjects)
                .into_iter()
                .map(|summary| {
                    serde_json::json!({
                        "band": band_for(summary.accuracy, &colors),
                        "summary": summary,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        StatsAction::Simulados => {
            let simulados = load_or_warn("simulados", store.simulados());
            let rows: Vec<serde_json::Value> = simulados
                .iter()
                .map(|sim| {
                    let accuracy = round1(simulado_overall_accuracy(sim));
                    serde_json::json!({
                        "id": sim.id,
                        "name": sim.name,
                        "date": sim.date,
                        "overall_accuracy": accuracy,
                        "band": band_for(accuracy, &colors),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}
