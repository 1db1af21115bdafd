//! Report assembly. Every sentence comes from the quiz's narrative tables or
//! the fixed insight strings below; the builder only selects and orders.
//!
//! Section order: identification, summary, cold reading, insights (free text
//! only), recommendations, category map and action plan (closed form only),
//! per-question detail.

use crate::engine::open_text::OpenQuizResult;
use crate::engine::scoring::Level;
use crate::engine::tags::{top_tags, TagScore};
use crate::engine::ClosedResult;
use crate::quiz::{QuizDefinition, MAX_OPTION_VALUE};
use crate::report::{excerpt, Item, ReportDocument, Section, ANSWER_EXCERPT_CHARS, DISCLAIMER};

/// Number of worst-scoring categories that feed the action plan.
const ACTION_PLAN_CATEGORIES: usize = 2;

const INSIGHT_EVASIVE: &str = "Respostas curtas ou evasivas em múltiplas questões sugerem desconforto em reconhecer padrões, um sinal importante por si só.";
const INSIGHT_CONSISTENT: &str = "A maioria das suas respostas revela padrões consistentes de dificuldade que se reforçam mutuamente.";
const INSIGHT_LONG: &str = "A extensão das suas respostas indica que esse tema ocupa um espaço significativo na sua mente, mais do que você talvez admita.";
const INSIGHT_NEUTRAL: &str = "Mesmo em respostas aparentemente neutras, padrões subjacentes foram identificados que merecem atenção.";
const SIGNALS_ESTABLISHED: &str = "A quantidade de sinais identificados nas suas respostas indica um padrão estabelecido que demanda ação imediata.";
const SIGNALS_FORMING: &str = "Padrões em formação foram detectados. Agir agora evita que se consolidem.";

/// What a report is built from: one scored session of either form.
#[derive(Debug, Clone, Copy)]
pub enum ReportInput<'a, 'q> {
    Closed(&'a ClosedResult<'q>),
    Open(&'a OpenQuizResult),
}

impl ReportInput<'_, '_> {
    fn score(&self) -> u32 {
        match self {
            ReportInput::Closed(r) => r.total_score,
            ReportInput::Open(r) => r.total_score,
        }
    }

    fn level(&self) -> Level {
        match self {
            ReportInput::Closed(r) => r.level,
            ReportInput::Open(r) => r.level,
        }
    }

    fn tag_ranking(&self) -> &[TagScore] {
        match self {
            ReportInput::Closed(r) => &r.tag_ranking,
            ReportInput::Open(r) => &r.tag_ranking,
        }
    }
}

/// Builds the report for one respondent. Deterministic: equal inputs give equal documents.
pub fn build_report(name: &str, quiz: &QuizDefinition, input: ReportInput<'_, '_>) -> ReportDocument {
    let level = input.level();
    let narrative = &quiz.narrative;
    let top_tag = input.tag_ranking().first().map(|t| t.tag.as_str());

    let mut sections = Vec::new();

    let (form, max_score) = match input {
        ReportInput::Closed(_) => ("Múltipla escolha", quiz.level_scale().max_score()),
        ReportInput::Open(_) => ("Respostas escritas", quiz.open_level_scale().max_score()),
    };
    let mut identification = Section::new("IDENTIFICAÇÃO");
    identification
        .push(Item::Line(format!("Nome: {name}")))
        .push(Item::Line(format!("Questionário: {}", quiz.title)))
        .push(Item::Line(format!("Formato: {form}")))
        .push(Item::Line(format!("Pontuação: {}/{max_score}", input.score())))
        .push(Item::Line(format!("Nível: {}", level.label())));
    sections.push(identification);

    let mut summary = Section::new("RESUMO");
    summary.push(Item::Line(narrative.summary(level).to_string()));
    sections.push(summary);

    let mut cold = Section::new("OBSERVAÇÕES PRINCIPAIS");
    for statement in &narrative.cold_reading {
        cold.push(Item::Bullet(statement.clone()));
    }
    if let Some(extra) = top_tag.and_then(|tag| narrative.cold_reading_for_tag(tag)) {
        cold.push(Item::Bullet(extra.to_string()));
    }
    sections.push(cold);

    if let ReportInput::Open(result) = input {
        let mut insights = Section::new("INSIGHTS DA ANÁLISE");
        for insight in open_insights(result) {
            insights.push(Item::Bullet(insight.to_string()));
        }
        sections.push(insights);
    }

    let mut recommendations = Section::new("RECOMENDAÇÕES");
    for (index, text) in narrative.recommendations(level).iter().enumerate() {
        recommendations.push(Item::Numbered {
            index: index + 1,
            text: text.clone(),
        });
    }
    sections.push(recommendations);

    match input {
        ReportInput::Closed(result) => {
            sections.push(category_map(quiz, &result.tag_ranking));
            if let Some(plan) = action_plan(quiz, &result.tag_ranking) {
                sections.push(plan);
            }
            sections.push(closed_detail(result));
        }
        ReportInput::Open(result) => sections.push(open_detail(quiz, result)),
    }

    ReportDocument {
        title: format!("Relatório personalizado - {}", quiz.title),
        sections,
        footer: DISCLAIMER.to_string(),
    }
}

fn category_map(quiz: &QuizDefinition, ranking: &[TagScore]) -> Section {
    let mut section = Section::new("MAPA POR CATEGORIA");
    for entry in ranking {
        section.push(Item::Bar {
            label: quiz.tag_label(&entry.tag).to_string(),
            value: entry.average,
            max: MAX_OPTION_VALUE as f64,
        });
    }
    section
}

/// Tips for the categories with the highest concern averages. `None` when no tag has tips.
fn action_plan(quiz: &QuizDefinition, ranking: &[TagScore]) -> Option<Section> {
    let mut section = Section::new("PLANO DE AÇÃO");
    for tag in top_tags(ranking, ACTION_PLAN_CATEGORIES) {
        let tips = quiz.narrative.tips_for_tag(tag);
        if tips.is_empty() {
            continue;
        }
        section.push(Item::Line(format!("{}:", quiz.tag_label(tag))));
        for tip in tips {
            section.push(Item::Bullet(tip.clone()));
        }
    }
    (!section.items.is_empty()).then_some(section)
}

fn closed_detail(result: &ClosedResult<'_>) -> Section {
    let mut section = Section::new("DETALHAMENTO DAS RESPOSTAS");
    for (index, answer) in result.answers.iter().enumerate() {
        section
            .push(Item::Numbered {
                index: index + 1,
                text: answer.question.text.clone(),
            })
            .push(Item::Detail(format!(
                "Resposta: {} ({}/{MAX_OPTION_VALUE})",
                answer.choice_label(),
                answer.value.get()
            )));
    }
    section
}

fn open_detail(quiz: &QuizDefinition, result: &OpenQuizResult) -> Section {
    let mut section = Section::new("ANÁLISE POR RESPOSTA");
    for (index, analysis) in result.analyses.iter().enumerate() {
        let prompt = quiz
            .open_question(&analysis.question_id)
            .map(|q| q.text.clone())
            .unwrap_or_else(|| analysis.question_id.clone());
        section
            .push(Item::Numbered {
                index: index + 1,
                text: prompt,
            })
            .push(Item::Detail(format!(
                "Resposta: \"{}\"",
                excerpt(&analysis.text, ANSWER_EXCERPT_CHARS)
            )))
            .push(Item::Detail(format!(
                "Pontuação: {}/{MAX_OPTION_VALUE} | Sinais: neg={}, pos={}",
                analysis.score,
                analysis.negative_hits.len(),
                analysis.positive_hits.len()
            )));
    }
    section
}

fn open_insights(result: &OpenQuizResult) -> Vec<&'static str> {
    let mut insights = Vec::new();

    let evasive = result.analyses.iter().filter(|a| a.is_evasive()).count();
    if evasive >= 2 {
        insights.push(INSIGHT_EVASIVE);
    }

    let high = result.analyses.iter().filter(|a| a.score >= 3).count();
    if high >= 3 {
        insights.push(INSIGHT_CONSISTENT);
    }

    let total_chars: usize = result.analyses.iter().map(|a| a.text.chars().count()).sum();
    let average_chars = total_chars as f64 / result.analyses.len().max(1) as f64;
    if average_chars > 150.0 {
        insights.push(INSIGHT_LONG);
    }

    match result.total_negative_hits() {
        n if n >= 8 => insights.push(SIGNALS_ESTABLISHED),
        n if n >= 4 => insights.push(SIGNALS_FORMING),
        _ => {}
    }

    if insights.is_empty() {
        insights.push(INSIGHT_NEUTRAL);
    }
    insights
}
