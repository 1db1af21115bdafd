use crate::quiz::catalog::{closed, open, options, strings, table, tips};
use crate::quiz::narrative::{Narrative, PerLevel};
use crate::quiz::{QuizCopy, QuizDefinition, Segment, SelectionStrategy};

pub fn definition() -> QuizDefinition {
    QuizDefinition {
        id: "ansiedade".to_string(),
        slug: "ansiedade".to_string(),
        title: "Teste de Ansiedade — Descubra o que você não está vendo".to_string(),
        copy: QuizCopy {
            subtitle: "87% das pessoas descobrem padrões ocultos que afetam sono, foco e decisões."
                .to_string(),
            description: "Apenas 5 perguntas rápidas. O questionário se adapta às suas respostas e revela o que passa despercebido no dia a dia.".to_string(),
            hook_line: "A maioria das pessoas só percebe a ansiedade quando ela já está no limite. Você vai esperar chegar lá?".to_string(),
            urgency_line: "Relatório gratuito disponível por tempo limitado — aproveite agora."
                .to_string(),
            social_proof: "Mais de 3.200 pessoas já fizeram este questionário e descobriram padrões que ignoravam.".to_string(),
        },
        total_questions: 5,
        strategy: SelectionStrategy::Segment,
        question_pool: vec![
            closed(
                "ans-base-1",
                "Quando algo sai do controle, quanto tempo você leva para se acalmar?",
                options::time_to_calm(),
                Segment::Base,
                &["controle", "corpo"],
            ),
            closed(
                "ans-sutil-1",
                "Você sente o corpo cansado no fim do dia mesmo sem esforço físico?",
                options::frequency(),
                Segment::Sutil,
                &["corpo", "rotina"],
            ),
            closed(
                "ans-sutil-2",
                "Antes de conversas importantes, você ensaia mentalmente o que vai falar?",
                options::certainty(),
                Segment::Sutil,
                &["social", "controle"],
            ),
            closed(
                "ans-sutil-3",
                "Sua mente fica revisando situações que já passaram?",
                options::frequency(),
                Segment::Sutil,
                &["foco", "controle"],
            ),
            closed(
                "ans-sutil-4",
                "Você evita tomar decisões rápidas por medo de errar?",
                options::certainty(),
                Segment::Sutil,
                &["controle", "foco"],
            ),
            closed(
                "ans-mod-1",
                "Você acorda já pensando em tudo que precisa resolver?",
                options::frequency(),
                Segment::Moderado,
                &["sono", "foco"],
            ),
            closed(
                "ans-mod-2",
                "Você se irrita quando algo simples foge do plano?",
                options::frequency(),
                Segment::Moderado,
                &["controle", "corpo"],
            ),
            closed(
                "ans-mod-3",
                "Lugares cheios geram desconforto mesmo quando está tudo bem?",
                options::certainty(),
                Segment::Moderado,
                &["social", "corpo"],
            ),
            closed(
                "ans-mod-4",
                "Você sente o coração acelerar em situações comuns do dia a dia?",
                options::frequency(),
                Segment::Moderado,
                &["corpo"],
            ),
            closed(
                "ans-int-1",
                "Seus pensamentos aceleram a ponto de travar suas decisões?",
                options::frequency(),
                Segment::Intenso,
                &["foco", "controle"],
            ),
            closed(
                "ans-int-2",
                "Você tem dificuldade para relaxar mesmo quando tudo está sob controle?",
                options::frequency(),
                Segment::Intenso,
                &["corpo", "controle"],
            ),
            closed(
                "ans-int-3",
                "Você já evitou compromissos por receio de não se sentir bem?",
                options::frequency(),
                Segment::Intenso,
                &["social", "rotina"],
            ),
            closed(
                "ans-int-4",
                "Você sente um medo ou aperto sem motivo claro?",
                options::frequency(),
                Segment::Intenso,
                &["corpo"],
            ),
        ],
        open_questions: vec![
            open(
                "ans-open-1",
                "Descreva como você se sente quando algo inesperado acontece no seu dia.",
                "Ex: Fico nervoso, meu coração dispara e não consigo pensar...",
                &["controle", "corpo"],
                &[
                    "nervoso", "ansioso", "medo", "pânico", "desespero", "trava", "congela",
                    "paralisa", "acelera", "coração", "tremor", "suor", "sufoca", "aperto",
                    "angústia", "descontrole", "irritado", "agitado", "preocupado", "tenso",
                ],
                &[
                    "calmo", "tranquilo", "respiro", "controle", "equilíbrio", "natural", "lido",
                    "resolvo", "aceito", "normal",
                ],
            ),
            open(
                "ans-open-2",
                "Como está a qualidade do seu sono? Descreva uma noite típica.",
                "Ex: Demoro para dormir, acordo várias vezes pensando...",
                &["sono", "corpo"],
                &[
                    "insônia", "acordo", "demoro", "pensando", "ruminando", "pesadelo",
                    "cansado", "exausto", "agitado", "inquieto", "madrugada", "não durmo",
                    "leve", "ruim", "péssimo", "irregular",
                ],
                &[
                    "bem", "profundo", "descansado", "regular", "rápido", "tranquilo",
                    "sem problemas",
                ],
            ),
            open(
                "ans-open-3",
                "Como você reage em situações sociais que exigem sua participação ativa?",
                "Ex: Evito falar, fico desconfortável, prefiro não ir...",
                &["social", "controle"],
                &[
                    "evito", "desconfortável", "medo", "vergonha", "julgamento", "observam",
                    "fujo", "escapo", "não vou", "cancelo", "tenso", "suor", "tremor", "esgota",
                    "drena", "cansativo",
                ],
                &[
                    "gosto", "natural", "confortável", "tranquilo", "participo", "socializo",
                    "fácil",
                ],
            ),
            open(
                "ans-open-4",
                "Descreva o que acontece na sua mente quando você precisa tomar uma decisão importante.",
                "Ex: Fico indeciso, penso em todos os cenários ruins...",
                &["foco", "controle"],
                &[
                    "indeciso", "confuso", "cenários", "medo", "errar", "arrepender", "paraliso",
                    "trava", "demoro", "inseguro", "risco", "catástrofe", "piores",
                    "consequências", "ansioso", "angústia",
                ],
                &[
                    "analiso", "decido", "confio", "racional", "objetivo", "claro", "seguro",
                    "rápido",
                ],
            ),
            open(
                "ans-open-5",
                "Como seu corpo reage em momentos de pressão no trabalho ou na vida pessoal?",
                "Ex: Sinto dor de cabeça, aperto no peito, tensão muscular...",
                &["corpo", "rotina"],
                &[
                    "dor", "cabeça", "peito", "tensão", "muscular", "estômago", "náusea",
                    "tremor", "suor", "falta de ar", "palpitação", "aperto", "enjoo",
                    "formigamento", "tontura", "cansaço", "exaustão", "queda",
                ],
                &[
                    "normal", "bem", "controlo", "respiro", "tranquilo", "nada", "saudável",
                    "disposto",
                ],
            ),
        ],
        narrative: narrative(),
    }
}

fn narrative() -> Narrative {
    Narrative {
        summaries: PerLevel {
            baixo: "Seu perfil indica sinais leves de ansiedade no momento.".to_string(),
            moderado: "Seu perfil indica sinais moderados de ansiedade, que merecem atenção."
                .to_string(),
            alto: "Seu perfil indica sinais altos de ansiedade, com impacto no dia a dia."
                .to_string(),
            muito_alto:
                "Seu perfil indica sinais muito altos de ansiedade. Isso merece cuidado imediato."
                    .to_string(),
        },
        recommendations: PerLevel {
            baixo: strings(&[
                "Mantenha hábitos de sono consistentes.",
                "Inclua pausas conscientes na rotina.",
                "Observe gatilhos que aumentam a preocupação.",
            ]),
            moderado: strings(&[
                "Registre pensamentos recorrentes para aliviar a mente.",
                "Reserve momentos de respiração profunda durante o dia.",
                "Ajuste limites e reduza sobrecarga de tarefas.",
            ]),
            alto: strings(&[
                "Crie rituais de desaceleração antes de dormir.",
                "Evite excesso de cafeína e notícias estressantes.",
                "Considere apoio profissional para estratégias avançadas.",
            ]),
            muito_alto: strings(&[
                "Busque apoio profissional o quanto antes.",
                "Crie uma rede de apoio com pessoas próximas.",
                "Reduza estímulos e priorize autocuidado diário.",
            ]),
        },
        cold_reading: strings(&[
            "A forma como você descreve suas reações indica que o estado de alerta é mais constante do que você reconhece.",
            "Há uma camada de normalização nas suas respostas — você se acostumou com um nível de tensão que não deveria ser normal.",
            "Seu corpo e sua mente vêm dando sinais que você provavelmente tem adiado ouvir.",
        ]),
        cold_reading_by_tag: table(&[
            ("controle", "Sua necessidade de controle é um padrão central que consome energia emocional de forma silenciosa."),
            ("corpo", "Seu corpo está sinalizando sobrecarga — esses sinais físicos tendem a se intensificar."),
            ("foco", "O ruído mental que você descreve indica uma mente que não desliga — mesmo quando deveria."),
            ("sono", "A qualidade do seu descanso está comprometida, o que amplifica todos os outros padrões."),
            ("social", "Situações sociais estão custando mais energia do que deveriam — há um padrão de evitação se formando."),
            ("rotina", "A sobrecarga da rotina está criando um efeito cascata que afeta múltiplas áreas."),
        ]),
        tag_labels: table(&[
            ("controle", "Necessidade de controle"),
            ("corpo", "Sinais físicos"),
            ("foco", "Ruído mental e foco"),
            ("sono", "Qualidade do sono"),
            ("social", "Interação social"),
            ("rotina", "Sobrecarga da rotina"),
        ]),
        tag_tips: tips(&[
            ("controle", [
                "Separe o que depende de você do que não depende antes de reagir.",
                "Pratique tolerar pequenas mudanças de plano sem corrigi-las na hora.",
            ]),
            ("corpo", [
                "Faça pausas de respiração diafragmática de 2 minutos ao longo do dia.",
                "Inclua atividade física leve pelo menos três vezes por semana.",
            ]),
            ("foco", [
                "Anote pensamentos recorrentes em um caderno para esvaziar a mente.",
                "Trabalhe em blocos curtos de foco, com uma tarefa por vez.",
            ]),
            ("sono", [
                "Mantenha horários fixos para dormir e acordar, inclusive nos fins de semana.",
                "Desligue telas e notícias uma hora antes de deitar.",
            ]),
            ("social", [
                "Exponha-se aos poucos a situações sociais de baixa exigência.",
                "Combine com alguém de confiança um sinal para pausas em eventos.",
            ]),
            ("rotina", [
                "Reduza compromissos não essenciais nas próximas duas semanas.",
                "Bloqueie na agenda intervalos reais de descanso.",
            ]),
        ]),
    }
}
