//! Prompt templates. The texts are Portuguese because the answers are shown
//! to Portuguese-speaking travellers as-is.

use super::Topic;

pub const TOUR_GUIDE_SYSTEM_PROMPT: &str = "Você é um guia turístico especializado em cidades brasileiras. Descreva em detalhes os principais pontos turísticos, cultura, gastronomia e características únicas da cidade. Use um tom entusiasmado e informativo. Responda em português.";

pub fn city_description(city: &str, topic: Topic) -> String {
    format!(
        "Descreva a cidade de {city}.Responda apenas e somente sobre {topic}. Texto curto, apenas 100 caracteres. Formate e use {topic} como titulo de uma seção.."
    )
}

pub fn best_season(city: &str) -> String {
    format!("Qual a melhor época para visitar {city}? Responda em 3 linhas no máximo.")
}

pub fn typical_dishes(city: &str) -> String {
    format!(
        "Liste 3 pratos típicos de {city} com descrição breve de cada um. Formate como lista markdown."
    )
}

pub fn vacation_image(city: &str) -> String {
    format!(
        "Uma imagem representando férias em {city}, mostrando pontos turísticos icônicos e cultura local em estilo pop-art vibrante.\nEstilo: Ilustração digital colorida com tons vibrantes."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_names_the_topic_twice() {
        let prompt = city_description("Salvador", Topic::Gastronomia);

        assert!(prompt.starts_with("Descreva a cidade de Salvador."));
        assert_eq!(prompt.matches("Gastronomia").count(), 2);
    }

    #[test]
    fn follow_up_prompts_mention_the_city() {
        assert_eq!(
            best_season("Manaus"),
            "Qual a melhor época para visitar Manaus? Responda em 3 linhas no máximo."
        );
        assert!(typical_dishes("Belém").contains("pratos típicos de Belém"));
        assert!(vacation_image("Natal").contains("férias em Natal"));
    }
}
