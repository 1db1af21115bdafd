use crate::quiz::catalog::{closed, open, options, strings, table, tips};
use crate::quiz::narrative::{Narrative, PerLevel};
use crate::quiz::{QuizCopy, QuizDefinition, Segment, SelectionStrategy};

pub fn definition() -> QuizDefinition {
    QuizDefinition {
        id: "comunicacao".to_string(),
        slug: "comunicacao".to_string(),
        title: "Teste de Comunicação — Sua voz transmite o que você quer?".to_string(),
        copy: QuizCopy {
            subtitle: "92% dos profissionais subestimam falhas na própria comunicação. Descubra as suas.".to_string(),
            description: "5 perguntas rápidas que revelam pontos cegos na sua oratória, presença e poder de persuasão.".to_string(),
            hook_line: "Você pode estar perdendo oportunidades sem perceber — sua comunicação diz mais do que você imagina.".to_string(),
            urgency_line: "Vagas limitadas para o relatório personalizado gratuito. Não perca."
                .to_string(),
            social_proof: "Mais de 2.800 profissionais já identificaram falhas invisíveis na sua comunicação.".to_string(),
        },
        total_questions: 5,
        strategy: SelectionStrategy::TagAffinity,
        question_pool: vec![
            closed(
                "com-base-1",
                "Quando você fala em público ou em reuniões, sente que as pessoas realmente prestam atenção?",
                options::certainty(),
                Segment::Base,
                &["presenca", "impacto"],
            ),
            closed(
                "com-sutil-1",
                "Você percebe que perde o fio da ideia no meio de uma explicação?",
                options::frequency(),
                Segment::Sutil,
                &["clareza", "estrutura"],
            ),
            closed(
                "com-sutil-2",
                "Antes de apresentações, você sente insegurança sobre o que vai dizer?",
                options::frequency(),
                Segment::Sutil,
                &["confianca", "preparo"],
            ),
            closed(
                "com-sutil-3",
                "As pessoas pedem para você repetir ou explicar melhor o que disse?",
                options::frequency(),
                Segment::Sutil,
                &["clareza", "impacto"],
            ),
            closed(
                "com-sutil-4",
                "Você evita situações onde precisa falar na frente de outros?",
                options::certainty(),
                Segment::Sutil,
                &["confianca", "presenca"],
            ),
            closed(
                "com-mod-1",
                "Sua voz treme, fica baixa ou acelerada quando o assunto é importante?",
                options::frequency(),
                Segment::Moderado,
                &["voz", "confianca"],
            ),
            closed(
                "com-mod-2",
                "Você sente que não consegue convencer as pessoas mesmo tendo razão?",
                options::certainty(),
                Segment::Moderado,
                &["persuasao", "impacto"],
            ),
            closed(
                "com-mod-3",
                "Após uma conversa importante, você fica remoendo o que deveria ter dito?",
                options::frequency(),
                Segment::Moderado,
                &["preparo", "confianca"],
            ),
            closed(
                "com-mod-4",
                "Você tem dificuldade de manter contato visual ao falar com alguém?",
                options::certainty(),
                Segment::Moderado,
                &["presenca", "voz"],
            ),
            closed(
                "com-int-1",
                "Você já perdeu oportunidades profissionais por não saber se posicionar verbalmente?",
                options::frequency(),
                Segment::Intenso,
                &["impacto", "persuasao"],
            ),
            closed(
                "com-int-2",
                "Pessoas menos preparadas que você acabam sendo mais ouvidas em reuniões?",
                options::certainty(),
                Segment::Intenso,
                &["presenca", "persuasao"],
            ),
            closed(
                "com-int-3",
                "Você sente que sua comunicação limita seu crescimento profissional?",
                options::agreement(),
                Segment::Intenso,
                &["impacto", "confianca"],
            ),
            closed(
                "com-int-4",
                "Quando precisa improvisar uma fala, você trava ou fica em branco?",
                options::frequency(),
                Segment::Intenso,
                &["estrutura", "confianca"],
            ),
        ],
        open_questions: vec![
            open(
                "com-open-1",
                "Descreva como você se sente quando precisa falar em público ou em uma reunião importante.",
                "Ex: Fico nervoso, minha voz falha, esqueço o que ia dizer...",
                &["confianca", "presenca"],
                &[
                    "nervoso", "medo", "trava", "branco", "esquece", "embaraço", "vergonha",
                    "ansioso", "tremo", "suor", "voz falha", "gaguejo", "inseguro", "evito",
                    "pânico", "desconfortável", "fraco",
                ],
                &[
                    "confiante", "natural", "fluente", "preparo", "tranquilo", "gosto", "domino",
                    "seguro",
                ],
            ),
            open(
                "com-open-2",
                "Como as pessoas costumam reagir quando você apresenta uma ideia? Descreva.",
                "Ex: Pedem para repetir, parecem desinteressadas, não entendem...",
                &["clareza", "impacto"],
                &[
                    "repetir", "desinteresse", "confuso", "não entendem", "perdem", "dispersam",
                    "ignoram", "interrompem", "mudam de assunto", "dúvida", "perdido",
                    "complicado", "longo", "enrolado",
                ],
                &[
                    "entendem", "concordam", "interessam", "atenção", "claro", "direto",
                    "engajam", "elogiam",
                ],
            ),
            open(
                "com-open-3",
                "Descreva uma situação em que você precisou convencer alguém e como foi o resultado.",
                "Ex: Tentei argumentar mas a pessoa não me ouviu, não soube me posicionar...",
                &["persuasao", "impacto"],
                &[
                    "não ouviu", "não convenci", "perdeu", "fracassou", "fraco", "desistiu",
                    "não consegui", "ignorou", "rejeitou", "dificuldade", "inseguro",
                    "posicionar", "argumentar",
                ],
                &[
                    "convenci", "aceitou", "concordou", "influenciei", "consegui", "persuadi",
                    "resultado",
                ],
            ),
            open(
                "com-open-4",
                "Como você se prepara antes de uma apresentação ou conversa importante?",
                "Ex: Não me preparo muito, fico ansioso pensando no que pode dar errado...",
                &["preparo", "estrutura"],
                &[
                    "não preparo", "improviso", "ansioso", "medo", "errado", "esqueço",
                    "desorganizado", "última hora", "atrasado", "caótico", "sem estrutura",
                    "não planejo", "confuso",
                ],
                &[
                    "pesquiso", "organizo", "estruturo", "ensaio", "preparo", "roteiro",
                    "planejado", "treino",
                ],
            ),
            open(
                "com-open-5",
                "Descreva como sua voz e postura se comportam quando você está sob pressão ao falar.",
                "Ex: Minha voz fica baixa, falo rápido demais, cruzo os braços...",
                &["voz", "presenca"],
                &[
                    "baixa", "rápido", "tremo", "gaguejo", "cruzo", "encolho", "desvio olhar",
                    "inseguro", "monótono", "fraco", "sem energia", "cansado", "tenso",
                    "rígido", "fechado",
                ],
                &[
                    "firme", "claro", "forte", "confiante", "aberto", "contato visual",
                    "pausas", "natural",
                ],
            ),
        ],
        narrative: narrative(),
    }
}

fn narrative() -> Narrative {
    Narrative {
        summaries: PerLevel {
            baixo: "Sua comunicação apresenta pontos de ajuste leves, sem grandes bloqueios no momento.".to_string(),
            moderado: "Sua comunicação mostra falhas moderadas que já reduzem o alcance das suas ideias.".to_string(),
            alto: "Sua comunicação apresenta bloqueios altos que limitam sua presença e influência."
                .to_string(),
            muito_alto: "Sua comunicação está travando oportunidades de forma recorrente. Isso merece ação imediata.".to_string(),
        },
        recommendations: PerLevel {
            baixo: strings(&[
                "Grave-se falando por 2 minutos e observe ritmo e pausas.",
                "Estruture falas importantes em início, meio e fim.",
                "Peça retorno a alguém de confiança após reuniões.",
            ]),
            moderado: strings(&[
                "Prepare um roteiro curto antes de conversas importantes.",
                "Troque palavras de preenchimento por pausas intencionais.",
                "Pratique apresentar uma ideia em até 60 segundos.",
            ]),
            alto: strings(&[
                "Transforme ensaios em voz alta antes de apresentações em rotina.",
                "Trabalhe postura e contato visual nas conversas do dia a dia.",
                "Considere um treinamento orientado de oratória.",
            ]),
            muito_alto: strings(&[
                "Procure acompanhamento especializado em comunicação o quanto antes.",
                "Comece por ambientes seguros para ganhar repetição e confiança.",
                "Defina uma meta semanal de exposição gradual à fala em público.",
            ]),
        },
        cold_reading: strings(&[
            "Suas palavras revelam uma desconexão entre o que você quer transmitir e o que os outros percebem.",
            "Há um padrão de autocrítica nas suas respostas que intensifica a insegurança comunicativa.",
            "Você sabe mais do que consegue demonstrar quando precisa falar.",
        ]),
        cold_reading_by_tag: table(&[
            ("confianca", "A insegurança ao se comunicar é o fio condutor que conecta todas as dificuldades relatadas."),
            ("presenca", "Sua presença ao falar não reforça suas ideias — ela subtrai impacto sem que você perceba."),
            ("clareza", "A falta de estrutura nas suas falas faz com que mensagens importantes se percam no caminho."),
            ("impacto", "O impacto da sua comunicação está muito abaixo do seu potencial real."),
            ("persuasao", "Sua capacidade de influência está limitada por padrões que você pode não enxergar sozinho."),
            ("voz", "O comportamento vocal que você descreve transparece insegurança automaticamente."),
            ("preparo", "A falta de preparação estruturada está intensificando a ansiedade comunicativa."),
            ("estrutura", "Sem estrutura argumentativa, mesmo ideias brilhantes se perdem na execução."),
        ]),
        tag_labels: table(&[
            ("presenca", "Presença"),
            ("impacto", "Impacto"),
            ("clareza", "Clareza"),
            ("estrutura", "Estrutura do discurso"),
            ("confianca", "Confiança"),
            ("preparo", "Preparo"),
            ("voz", "Voz e postura"),
            ("persuasao", "Persuasão"),
        ]),
        tag_tips: tips(&[
            ("presenca", [
                "Mantenha contato visual até concluir cada frase.",
                "Adote uma postura aberta antes de começar a falar.",
            ]),
            ("impacto", [
                "Abra cada fala com a conclusão, não com o contexto.",
                "Termine com um pedido claro do que você espera de quem ouve.",
            ]),
            ("clareza", [
                "Limite cada explicação a três pontos principais.",
                "Troque termos vagos por exemplos concretos.",
            ]),
            ("estrutura", [
                "Use a sequência problema, solução e próximo passo.",
                "Escreva os tópicos da fala em uma única linha antes de começar.",
            ]),
            ("confianca", [
                "Registre pequenas vitórias de comunicação ao fim de cada semana.",
                "Ensaie as primeiras frases até saírem no automático.",
            ]),
            ("preparo", [
                "Reserve 15 minutos de preparação antes de reuniões importantes.",
                "Antecipe as perguntas mais prováveis e prepare respostas curtas.",
            ]),
            ("voz", [
                "Faça um aquecimento vocal de 3 minutos antes de falar em público.",
                "Reduza a velocidade da fala e marque pausas nos pontos-chave.",
            ]),
            ("persuasao", [
                "Conecte sua proposta a um interesse concreto de quem ouve.",
                "Sustente cada argumento com um dado ou uma história curta.",
            ]),
        ]),
    }
}
