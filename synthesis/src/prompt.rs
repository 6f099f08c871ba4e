//! Prompt construction for the generative collaborator.

use semsearch_embeddings::ScoredResult;

/// Number of top results handed to the selection prompt.
pub const SELECTION_TOP_N: usize = 3;

/// Format ranked results as a numbered list with accuracy percentages.
fn format_results(results: &[ScoredResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(index, r)| {
            format!(
                "{}. \"{}\" (precisão: {:.2}%)",
                index + 1,
                r.text,
                r.accuracy * 100.0
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the selection prompt over the top candidates.
///
/// The collaborator is instructed to choose among the supplied candidates
/// only, not from its background knowledge, and to answer with the labeled
/// `Melhor resposta:` / `Explicação:` segments that
/// [`crate::parse::parse_selection_text`] extracts.
pub fn selection_prompt(query: &str, top_results: &[ScoredResult]) -> String {
    let formatted = format_results(top_results);
    format!(
        "[INSTRUÇÕES DO SISTEMA]\n\
         Você é um assistente especializado em avaliar resultados de busca. Analise a consulta do usuário e os resultados de busca fornecidos.\n\
         Sua tarefa é identificar qual dos resultados melhor responde à consulta original APENAS com base nos resultados fornecidos, ignorando seu treinamento prévio.\n\
         Considere a relevância semântica e contextual, não apenas a porcentagem de precisão.\n\
         Retorne apenas o melhor resultado, com uma explicação breve de por que ele é o mais adequado.\n\
         Se nenhum dos resultados for adequado, indique isso claramente.\n\
         \n\
         [CONSULTA DO USUÁRIO]\n\
         {query}\n\
         \n\
         [RESULTADOS DA BUSCA (TOP {count})]\n\
         {formatted}\n\
         \n\
         [FORMATO DE RESPOSTA]\n\
         Melhor resposta: (texto do resultado que melhor responde à consulta)\n\
         Explicação: (explicação concisa do motivo)",
        count = top_results.len(),
    )
}

/// Build the narrative prompt over the full ranked list.
///
/// This is a rephrasing task, not a ranking task: the collaborator must
/// reference every result and may not declare any of them irrelevant or pick
/// a single best one.
pub fn narrative_prompt(query: &str, results: &[ScoredResult]) -> String {
    let formatted = format_results(results);
    format!(
        "[INSTRUÇÕES DO SISTEMA]\n\
         Você é um assistente que conversa de forma natural com o usuário.\n\
         Reformule os resultados de busca abaixo em uma única resposta fluida que faça referência a todos os resultados.\n\
         Não descarte nenhum resultado como irrelevante e não escolha um único melhor resultado.\n\
         \n\
         [CONSULTA DO USUÁRIO]\n\
         {query}\n\
         \n\
         [RESULTADOS DA BUSCA]\n\
         {formatted}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_prompt_formats_candidates() {
        let results = vec![
            ScoredResult::new("O gato está no telhado", 0.9),
            ScoredResult::new("O cachorro late para a lua", 0.1),
        ];

        let prompt = selection_prompt("Onde está o gato?", &results);

        assert!(prompt.contains("Onde está o gato?"));
        assert!(prompt.contains("1. \"O gato está no telhado\" (precisão: 90.00%)"));
        assert!(prompt.contains("2. \"O cachorro late para a lua\" (precisão: 10.00%)"));
        assert!(prompt.contains("Melhor resposta:"));
        assert!(prompt.contains("Explicação:"));
    }

    #[test]
    fn test_narrative_prompt_references_all_results() {
        let results = vec![
            ScoredResult::new("primeiro", 0.8),
            ScoredResult::new("segundo", 0.6),
            ScoredResult::new("terceiro", 0.5),
        ];

        let prompt = narrative_prompt("alguma consulta", &results);

        for r in &results {
            assert!(prompt.contains(&r.text));
        }
        assert!(!prompt.contains("Melhor resposta:"));
    }
}
