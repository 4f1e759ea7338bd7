//! Report prompt. A static business template with a single substitution point.
//!
//! The wording is owned by the sales team (Handboek Branche-analyse Richting) and
//! must be sent byte for byte, leading newline and indentation included.

use crate::domain::entities::{AnalysisRequest, Prompt};

const TEMPLATE_HEAD: &str = "
      Voer een diepgaande brancheanalyse uit voor de organisatie
      die te identificeren is via hun website: ";

const TEMPLATE_TAIL: &str = ".

      Hanteer de instructies uit het '20250623 Handboek Branche-analyse Richting'
      als een strikt kader. Genereer een volledig rapport met alle 10 hoofdstukken
      zoals daarin beschreven, inclusief de vereiste tabellen en matrices.

      Schrijf het rapport vanuit de rol en het perspectief van
      'een externe strategisch adviseur voor de Arbo Risico Databank'.
      Richt het advies als een persoonlijk schrijven aan 'de directie'
      van de te analyseren organisatie.

      Baseer de schrijfstijl op een professionele, deskundige en adviserende toon.
      Zorg ervoor dat alle matrices en tabellen met beoordelingen
      gebruikmaken van visuele symbolen (zoals '●' en '○') in plaats van
      tekstuele omschrijvingen ('hoog'/'laag').
    ";

/// Build the prompt for one request. The URL is inserted verbatim.
pub fn build_prompt(request: &AnalysisRequest) -> Prompt {
    let url = &request.website_url;
    let mut text = String::with_capacity(TEMPLATE_HEAD.len() + url.len() + TEMPLATE_TAIL.len());
    text.push_str(TEMPLATE_HEAD);
    text.push_str(url);
    text.push_str(TEMPLATE_TAIL);
    Prompt::new(text)
}
