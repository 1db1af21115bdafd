use crate::quiz::catalog::{closed, open, options, strings, table, tips};
use crate::quiz::narrative::{Narrative, PerLevel};
use crate::quiz::{QuizCopy, QuizDefinition, Segment, SelectionStrategy};

pub fn definition() -> QuizDefinition {
    QuizDefinition {
        id: "vendas".to_string(),
        slug: "vendas".to_string(),
        title: "Teste de Vendas — Você está deixando dinheiro na mesa?".to_string(),
        copy: QuizCopy {
            subtitle: "94% dos vendedores cometem erros que custam até 40% do faturamento sem perceber.".to_string(),
            description: "5 perguntas rápidas que expõem os gargalos ocultos no seu processo de vendas e negociação.".to_string(),
            hook_line: "Se você acha que vende bem, este teste vai te mostrar exatamente onde está perdendo dinheiro.".to_string(),
            urgency_line: "Diagnóstico gratuito disponível por tempo limitado — descubra seus gaps agora.".to_string(),
            social_proof: "Mais de 4.100 profissionais já identificaram falhas invisíveis que travavam suas vendas.".to_string(),
        },
        total_questions: 5,
        strategy: SelectionStrategy::TagAffinity,
        question_pool: vec![
            closed(
                "ven-base-1",
                "Quando um cliente diz 'vou pensar', você sabe exatamente o que fazer para reverter?",
                options::certainty(),
                Segment::Base,
                &["objecao", "fechamento"],
            ),
            closed(
                "ven-sutil-1",
                "Você consegue identificar o real motivo de compra do cliente nos primeiros minutos?",
                options::certainty(),
                Segment::Sutil,
                &["diagnostico", "escuta"],
            ),
            closed(
                "ven-sutil-2",
                "Seus clientes costumam pedir desconto antes de você apresentar o valor completo?",
                options::frequency(),
                Segment::Sutil,
                &["valor", "posicionamento"],
            ),
            closed(
                "ven-sutil-3",
                "Você segue um processo estruturado de vendas ou depende mais da intuição?",
                options::agreement(),
                Segment::Sutil,
                &["processo", "consistencia"],
            ),
            closed(
                "ven-sutil-4",
                "Com que frequência você perde vendas que pareciam certas?",
                options::frequency(),
                Segment::Sutil,
                &["fechamento", "diagnostico"],
            ),
            closed(
                "ven-mod-1",
                "Você sente desconforto ao falar de preço ou pedir o fechamento?",
                options::frequency(),
                Segment::Moderado,
                &["fechamento", "mentalidade"],
            ),
            closed(
                "ven-mod-2",
                "Seus clientes comparam você com concorrentes mais baratos com frequência?",
                options::frequency(),
                Segment::Moderado,
                &["valor", "posicionamento"],
            ),
            closed(
                "ven-mod-3",
                "Depois de uma reunião de vendas, você sabe dizer qual foi o erro se não fechou?",
                options::certainty(),
                Segment::Moderado,
                &["processo", "diagnostico"],
            ),
            closed(
                "ven-mod-4",
                "Você depende de poucos clientes grandes em vez de ter uma base diversificada?",
                options::agreement(),
                Segment::Moderado,
                &["consistencia", "prospeccao"],
            ),
            closed(
                "ven-int-1",
                "Você já baixou seu preço só para não perder a venda, mesmo sabendo que não deveria?",
                options::frequency(),
                Segment::Intenso,
                &["valor", "mentalidade"],
            ),
            closed(
                "ven-int-2",
                "Suas metas de vendas estão estagnadas ou caindo nos últimos meses?",
                options::agreement(),
                Segment::Intenso,
                &["consistencia", "processo"],
            ),
            closed(
                "ven-int-3",
                "Você sente que trabalha muito mas o resultado financeiro não acompanha o esforço?",
                options::frequency(),
                Segment::Intenso,
                &["mentalidade", "prospeccao"],
            ),
            closed(
                "ven-int-4",
                "Clientes que demonstraram interesse somem sem dar retorno depois do primeiro contato?",
                options::frequency(),
                Segment::Intenso,
                &["objecao", "fechamento"],
            ),
        ],
        open_questions: vec![
            open(
                "ven-open-1",
                "Descreva o que acontece quando um cliente diz que precisa pensar antes de fechar.",
                "Ex: Aceito e espero ele voltar, não sei o que fazer...",
                &["objecao", "fechamento"],
                &[
                    "aceito", "espero", "não sei", "perco", "desisto", "voltar", "ligação",
                    "insisto", "pressiono", "desconto", "nervoso", "frustrado", "impotente",
                    "medo", "desconfortável",
                ],
                &[
                    "pergunto", "investigo", "entendo", "contorno", "técnica", "agendo",
                    "acompanho", "processo",
                ],
            ),
            open(
                "ven-open-2",
                "Como você identifica o que o cliente realmente precisa antes de oferecer sua solução?",
                "Ex: Já apresento meu produto direto, não faço muitas perguntas...",
                &["diagnostico", "escuta"],
                &[
                    "direto", "não pergunto", "apresento", "adivinhar", "assumo", "acho",
                    "intuição", "rapidez", "pulo", "ignoro", "não escuto", "falo mais",
                ],
                &[
                    "pergunto", "escuto", "investigo", "diagnóstico", "necessidade", "dor",
                    "mapeio", "entendo",
                ],
            ),
            open(
                "ven-open-3",
                "Descreva como você apresenta o preço do seu produto ou serviço ao cliente.",
                "Ex: Falo o preço e espero a reação, fico desconfortável...",
                &["valor", "posicionamento"],
                &[
                    "desconfortável", "medo", "espero", "reação", "desconto", "barato", "caro",
                    "justificar", "nervoso", "baixo", "preço", "comparação", "concorrente",
                    "inseguro",
                ],
                &[
                    "valor", "resultado", "transformação", "investimento", "confiante",
                    "ancoro", "comparo", "benefício",
                ],
            ),
            open(
                "ven-open-4",
                "Descreva como é o seu processo de vendas desde o primeiro contato até o fechamento.",
                "Ex: Não tenho processo definido, depende do cliente...",
                &["processo", "consistencia"],
                &[
                    "não tenho", "depende", "improviso", "diferente", "cada caso", "sorte",
                    "aleatório", "sem padrão", "confuso", "desorganizado", "informal",
                    "intuitivo", "acaso",
                ],
                &[
                    "etapas", "funil", "processo", "script", "padrão", "métricas", "acompanho",
                    "estruturado", "definido",
                ],
            ),
            open(
                "ven-open-5",
                "Como você se sente quando precisa prospectar novos clientes ou iniciar contatos frios?",
                "Ex: Evito prospectar, não gosto de ligar para desconhecidos...",
                &["mentalidade", "prospeccao"],
                &[
                    "evito", "não gosto", "medo", "rejeição", "desconfortável", "vergonha",
                    "difícil", "chato", "cansativo", "esgota", "procrastino", "adio", "ansioso",
                    "incomoda", "constrangimento",
                ],
                &[
                    "gosto", "natural", "rotina", "disciplina", "prospecção", "oportunidade",
                    "confiante", "motivado",
                ],
            ),
        ],
        narrative: narrative(),
    }
}

fn narrative() -> Narrative {
    Narrative {
        summaries: PerLevel {
            baixo: "Seu processo de vendas tem gargalos leves e pontuais.".to_string(),
            moderado: "Seu processo de vendas apresenta falhas moderadas que já custam negócios."
                .to_string(),
            alto: "Seu processo de vendas tem gargalos altos que drenam faturamento todos os meses.".to_string(),
            muito_alto: "Seu processo de vendas está perdendo dinheiro de forma crítica. Isso exige correção imediata.".to_string(),
        },
        recommendations: PerLevel {
            baixo: strings(&[
                "Documente as etapas que você já segue para torná-las repetíveis.",
                "Revise toda semana as vendas perdidas e o motivo de cada uma.",
                "Teste uma nova pergunta de diagnóstico por semana.",
            ]),
            moderado: strings(&[
                "Crie um roteiro de perguntas para entender a dor do cliente.",
                "Apresente valor e resultado antes de falar de preço.",
                "Defina um próximo passo concreto ao fim de cada conversa.",
            ]),
            alto: strings(&[
                "Monte um funil com etapas e métricas claras.",
                "Treine respostas para as cinco objeções mais comuns.",
                "Pare de oferecer desconto como primeira reação.",
            ]),
            muito_alto: strings(&[
                "Busque mentoria ou treinamento estruturado em vendas imediatamente.",
                "Reconstrua seu posicionamento para sair da guerra de preço.",
                "Estabeleça uma rotina diária e inegociável de prospecção.",
            ]),
        },
        cold_reading: strings(&[
            "O vocabulário que você usa ao descrever vendas revela crenças limitantes sobre dinheiro e valor.",
            "Há um padrão de evitação nos pontos críticos do processo — exatamente onde a venda se decide.",
            "Parte das vendas que você perde já estava decidida antes da conversa sobre preço.",
        ]),
        cold_reading_by_tag: table(&[
            ("objecao", "A forma como você lida com objeções revela um padrão de rendição que custa vendas todos os meses."),
            ("fechamento", "O momento do fechamento é onde você mais perde — e o padrão se repete sem correção."),
            ("diagnostico", "Sem diagnóstico do cliente, você vende no escuro e oferece soluções que não conectam."),
            ("escuta", "Você fala mais do que deveria nas interações de venda — e isso afasta clientes."),
            ("valor", "A dificuldade em comunicar valor faz seus clientes focarem apenas em preço."),
            ("posicionamento", "Sem posicionamento claro, você compete no terreno errado — onde preço é tudo."),
            ("processo", "A ausência de processo faz cada venda depender de sorte e estado emocional."),
            ("consistencia", "A falta de consistência impede previsibilidade — você não sabe de onde vem o próximo cliente."),
            ("mentalidade", "Sua relação emocional com vendas sabota resultados antes mesmo de começar."),
            ("prospeccao", "O desconforto com prospecção está limitando seu pipeline e criando dependência de poucos clientes."),
        ]),
        tag_labels: table(&[
            ("objecao", "Objeções"),
            ("fechamento", "Fechamento"),
            ("diagnostico", "Diagnóstico do cliente"),
            ("escuta", "Escuta ativa"),
            ("valor", "Comunicação de valor"),
            ("posicionamento", "Posicionamento"),
            ("processo", "Processo comercial"),
            ("consistencia", "Consistência"),
            ("mentalidade", "Mentalidade"),
            ("prospeccao", "Prospecção"),
        ]),
        tag_tips: tips(&[
            ("objecao", [
                "Responda ao 'vou pensar' perguntando o que ainda gera dúvida.",
                "Liste as objeções recorrentes e prepare uma resposta para cada uma.",
            ]),
            ("fechamento", [
                "Proponha o fechamento de forma direta ao fim da apresentação.",
                "Combine data e próximo passo antes de encerrar cada conversa.",
            ]),
            ("diagnostico", [
                "Faça ao menos cinco perguntas antes de apresentar a solução.",
                "Resuma a dor do cliente com as palavras dele antes de ofertar.",
            ]),
            ("escuta", [
                "Fale no máximo 30% do tempo nas primeiras conversas.",
                "Anote as expressões do cliente e use-as na proposta.",
            ]),
            ("valor", [
                "Apresente o resultado esperado antes do preço.",
                "Ancore o investimento no custo de não resolver o problema.",
            ]),
            ("posicionamento", [
                "Defina com clareza para quem você não vende.",
                "Destaque um diferencial que o concorrente barato não entrega.",
            ]),
            ("processo", [
                "Desenhe as etapas do seu funil, do primeiro contato ao fechamento.",
                "Registre cada negociação em uma planilha ou CRM simples.",
            ]),
            ("consistencia", [
                "Defina metas semanais de atividade, não só de resultado.",
                "Diversifique a carteira para depender menos de poucos clientes.",
            ]),
            ("mentalidade", [
                "Trate cada 'não' como informação para ajustar a abordagem.",
                "Revise suas crenças sobre cobrar pelo valor que você entrega.",
            ]),
            ("prospeccao", [
                "Reserve um bloco fixo diário para novos contatos.",
                "Prepare uma mensagem de abordagem curta e teste variações.",
            ]),
        ]),
    }
}
