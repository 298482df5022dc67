//! Prompt constants and prompt assembly for canvas generation.
//!
//! The metaprompts are per-category instructional templates (French, like the
//! produced canvas). They are pure data: user-supplied field values are
//! interpolated verbatim, with no validation.

use crate::canvas::{BusinessCategory, BusinessProfile, CanvasBlock, SupplementaryFields};

/// System message for the generation conversation.
pub const GENERATION_SYSTEM: &str = "Tu es un assistant expert en génération de business plan.";

/// Metaprompt for a traditional SME operating in a low-tech / emerging-market
/// context (frugal innovation, limited infrastructure, local trust networks).
pub const METAPROMPT_PME: &str = r#"**Méta-Prompt pour l'Élaboration d'un Business Model pour PME Traditionnelle (Intégrant des Innovations Low-Tech et Adaptées aux Contextes Africains ou Émergents)**

**Votre Rôle :**
Vous êtes un expert en stratégie d'entreprise, marketing, UX, innovation frugale (low-tech et éventuellement high-tech) et élaboration de Business Models. Vous devez générer un Business Model complet, clair, chiffré, cohérent et innovant, adapté à une PME qui opère dans un environnement local (par exemple en Afrique ou dans d'autres pays émergents) où les réalités technologiques, économiques, culturelles et réglementaires diffèrent des contextes occidentaux fortement numérisés. L'innovation ne sera pas seulement technologique de pointe, mais aussi low-tech (solutions simples, robustes, faciles d'entretien, peu consommatrices de ressources), en tenant compte des infrastructures limitées, des préférences culturelles, de la disponibilité intermittente de l'électricité, du coût de la connectivité et de l'importance du lien social.

Votre tâche s'organise en trois phases :
1. Configuration Initiale (Collecte et Structuration des Données)
2. Étapes Intermédiaires (Analyse, Contexte, Empathie, Parcours Client, Optimisation)
3. Production Finale (Business Model Canvas)

### Phase 1 : Configuration Initiale

Recueille et structure les informations suivantes :
- **Persona** : données démographiques (âge, sexe, localisation urbaine/péri-urbaine/rurale, niveau d'éducation, langues parlées, profession, revenu moyen) ; paramètres comportementaux (sensibilité au prix, micro-paiements, fréquence d'achat, perception de la qualité, utilisation technologique — téléphones basiques, accès limité à Internet —, accessibilité, temps disponible, besoins spécifiques) ; capacité d'adoption de l'innovation (familiarité avec le mobile money, les radios communautaires, les solutions solaires ; importance de la preuve sociale et de la recommandation communautaire ; barrières psychologiques et culturelles).
- **Analyse du Marché** : taille du marché local, segments (urbains vs ruraux, artisans, commerçants, coopératives, secteur informel), offres concurrentes formelles et informelles, niveau de satisfaction actuel, tendances (mobile money, énergie solaire, solutions durables et réparables).
- **Facteurs Limitants** : contraintes technologiques (électricité instable, couverture internet inégale), économiques (revenus limités, accès restreint au crédit, tontines), culturelles (langues locales, confiance interpersonnelle), psychologiques et physiologiques (simplicité d'usage, modes d'emploi visuels), réglementaires (normes locales, barrières douanières).

Effectue ensuite une première analyse critique : vérifie la cohérence des informations, identifie les lacunes et propose des compléments.

### Phase 2 : Étapes Intermédiaires

- Décris le parcours client (avant, pendant, après) en tenant compte des conditions locales : bouche-à-oreille, démonstrations sur les marchés, paiement adapté (cash, mobile money), SAV local et pièces détachées.
- Identifie les points de contact, obstacles, moments de vérité et frustrations ; crée une carte d'empathie (pensées, sentiments, actions).
- Liste les gains (accès facilité à un service vital, robustesse, SAV local, meilleure productivité) et les souffrances (manque de solutions adaptées, coûts initiaux trop élevés, manque de formation).
- Élabore la carte de valeur : mission de consommation principale, gains déjà fournis par l'existant, souffrances non adressées, proposition de valeur préliminaire adaptée à la capacité d'adoption (solution simple, robuste, testable avant achat, distribution locale, paiement flexible).
- Détermine le segment de clients (B2C direct, B2B via coopératives, B2B2C via distributeurs locaux) et priorise.
- Analyse les problèmes et solutions : associe chaque problème majeur à une solution justifiée (réseau de réparateurs locaux, micro-paiements, démonstrations et témoignages de pairs).

Fais une analyse intermédiaire : cohérence du contexte, adoptabilité des innovations, ajustements stratégiques.

### Phase 3 : Production Finale du Business Model Canvas

Génère un Business Model Canvas complet de neuf blocs. Pour chaque bloc, tiens compte du contexte local, des solutions low-tech et des infrastructures limitées :

1. **Segments de Clients** — segments ciblés avec caractéristiques sociodémographiques, comportements d'achat, maturité technologique, capacité d'adoption, contraintes et scénarios évolutifs ; justifie leur rétention.
2. **Proposition de Valeur** — besoins fondamentaux, souffrances résolues, gains fournis (y compris émotionnels), différenciation (intégration locale, SAV, pricing adapté), introduction progressive de l'innovation, variantes par segment.
3. **Canaux de Distribution** — canaux hors ligne (marchés, vente itinérante, radios communautaires, leaders communautaires) et digitaux légers (SMS, USSD, WhatsApp, mobile money) ; justifie coût, accessibilité et confiance.
4. **Relations Clients** — personnalisation via agents locaux, communauté, automatisation simple (SMS, hotline), fidélisation, gestion des plaintes et garantie adaptée.
5. **Sources de Revenus** — tarification (vente directe abordable, micro-paiements, location-vente, abonnement maintenance), justification des prix, réduction des freins économiques, diversification.
6. **Ressources Clés** — humaines (agents et réparateurs locaux), technologiques (outils simples, paiement mobile), intellectuelles, matérielles (pièces robustes), financières (microfinance, trésorerie), relationnelles (communautés, ONG, radios).
7. **Activités Clés** — adaptation du produit au contexte, production et logistique simple, marketing terrain, support et formation, partenariats ; perspective adaptative.
8. **Partenaires Clés** — fournisseurs et distributeurs locaux, ONG et partenaires techniques, organismes de certification et médias locaux, institutions de microfinance ; anticipe les risques et les plans B.
9. **Structure de Coûts** — coûts fixes, variables et liés à l'innovation ; analyse de rentabilité et stratégies face aux fluctuations.

**Instructions finales** : vérifie la cohérence de l'ensemble, l'adoptabilité réelle de l'innovation par la persona, la rentabilité et la flexibilité du modèle, puis fournis un récapitulatif global avec quelques chiffres (taille de marché estimée, coûts, revenus, marge) pour valider la viabilité économique."#;

/// Metaprompt for a startup in a digitized market.
pub const METAPROMPT_STARTUP: &str = r#"Tu es un assistant expert en stratégie d'entreprise, marketing, UX, innovation et élaboration de Business Models. Ton rôle est de générer un Business Model complet, clair, chiffré, cohérent et innovant, en suivant trois phases : Configuration Initiale, Étapes Intermédiaires (Analyse, Contexte, Empathie, Parcours Client, Optimisation) et Production Finale (Business Model Canvas).

Tout au long du processus, tu dois :
- Prendre en compte la persona (données démographiques, comportementales, capacités d'adoption de l'innovation).
- Analyser le marché (taille, segments, offres existantes, niveau de satisfaction, tendances).
- Intégrer les facteurs limitants (technologiques, économiques, culturels, psychologiques, physiologiques, réglementaires).
- Évaluer la concurrence et comprendre le niveau de satisfaction actuel.
- Comprendre le parcours client (avant, pendant, après), la carte d'empathie, les gains et souffrances.
- Vérifier systématiquement la cohérence, proposer des optimisations et ajustements.
- Avant d'introduire une innovation, t'assurer que la persona est prête à l'adopter.
- Produire un Business Model Canvas complet de neuf blocs.

### Phase 1 : Configuration Initiale

Recueille et structure : la persona (démographie, comportements d'achat, sensibilité au prix, maturité technologique, ouverture au changement), l'analyse du marché (taille, segments, valeur totale, offres concurrentes, tendances, comportements émergents) et les facteurs limitants (technologiques, économiques, culturels, réglementaires). Effectue une première analyse critique : cohérence, lacunes, ajustements.

### Phase 2 : Étapes Intermédiaires

- Analyse du parcours client (avant, pendant, après) et carte d'empathie (pensées, sentiments, actions) ; points de contact, obstacles, moments de vérité, frustrations.
- Gains et souffrances issus du parcours client.
- Carte de valeur : mission de consommation principale, gains déjà fournis, souffrances non adressées, proposition de valeur préliminaire adaptée à la capacité d'adoption.
- Détermination du segment de clients (B2C, B2B, B2B2C) et priorisation (taille, pouvoir d'achat, ouverture à l'innovation).
- Canvas de problème : problèmes majeurs associés à des solutions justifiées face à l'existant.

Analyse intermédiaire : cohérence, adoptabilité, ajustements stratégiques.

### Phase 3 : Production Finale du Business Model Canvas

Génère les neuf blocs :

1. **Segments de Clients** — caractéristiques sociodémographiques, comportements d'achat, maturité technologique, capacité d'adoption, contraintes, scénarios évolutifs (évolution technologique, crise économique, appétence premium) ; justification des segments retenus.
2. **Proposition de Valeur** — besoins fondamentaux, souffrances résolues, gains fournis (y compris émotionnels et symboliques), différenciation concurrentielle, intégration progressive de l'innovation (essais gratuits, démonstrations, tutoriels), variantes par segment.
3. **Canaux de Distribution** — canaux en ligne (site, application, réseaux sociaux, marketplaces, SEO/SEA) et hors ligne (magasins, salons, revendeurs), cohérence omnicanale, accompagnement pédagogique, adaptabilité ; justifie chaque canal.
4. **Relations Clients** — personnalisation, communauté, automatisation (self-service, chatbots), fidélisation (récompenses, contenus exclusifs), gestion des plaintes ; évolution des relations dans le temps et impact sur la CLV.
5. **Sources de Revenus** — modèle de tarification (abonnement, paiement à l'usage, achat unique, freemium, licences, commissions), justification des prix, réduction des freins économiques, diversification, adaptation aux changements de contexte.
6. **Ressources Clés** — humaines, technologiques, intellectuelles (brevets, marques, contenus propriétaires), financières, relationnelles ; criticité de chaque ressource et avantage concurrentiel.
7. **Activités Clés** — développement et innovation, production et livraison, marketing et ventes, relation client et support, partenariats ; perspective adaptative face aux fluctuations.
8. **Partenaires Clés** — fournisseurs, distributeurs, partenaires technologiques, organismes de certification, influenceurs, écosystèmes sectoriels ; risques anticipés et plans B.
9. **Structure de Coûts** — coûts fixes, variables et liés à l'innovation ; rentabilité (CAC vs CLV, marges), leviers de réduction, réaction aux fluctuations du marché.

### Instructions Finales

Vérifie la cohérence entre tous les blocs, l'adoptabilité de l'innovation par la persona, la rentabilité et la viabilité à long terme. Ajuste si nécessaire, puis fournis un récapitulatif global avec des chiffres indicatifs (taille du marché, CAC, CLV, taux de conversion, CA projeté)."#;

/// Generic fallback when the category carries no dedicated metaprompt.
pub const METAPROMPT_AUTRE: &str = "Fournissez une approche générale adaptée à votre entreprise.";

impl BusinessCategory {
    /// Returns the metaprompt for this category. `Autre` doubles as the
    /// fallback for anything unrecognized (handled at deserialization).
    pub fn metaprompt(self) -> &'static str {
        match self {
            BusinessCategory::Pme => METAPROMPT_PME,
            BusinessCategory::Startup => METAPROMPT_STARTUP,
            BusinessCategory::Autre => METAPROMPT_AUTRE,
        }
    }

    /// Label interpolated into the prompt body.
    pub fn label(self) -> &'static str {
        match self {
            BusinessCategory::Pme => "PME",
            BusinessCategory::Startup => "Startup",
            BusinessCategory::Autre => "Autre",
        }
    }
}

/// Builds the single user-message payload for one submission: the category
/// metaprompt followed by the generation instructions and the supplementary
/// field values, interpolated verbatim.
pub fn build_prompt(profile: &BusinessProfile, fields: &SupplementaryFields) -> String {
    let mut rubriques = String::new();
    for block in CanvasBlock::ALL {
        let value = fields.get(block).trim();
        rubriques.push_str("- ");
        rubriques.push_str(block.label());
        rubriques.push_str(" : ");
        rubriques.push_str(if value.is_empty() {
            "(aucune indication)"
        } else {
            value
        });
        rubriques.push('\n');
    }

    format!(
        r#"{metaprompt}

Mène la réflexion de génération du business model sur base des indications (méta-prompts) précédentes.
Génère le contenu d'un Business Model Canvas en format HTML pour une entreprise nommée '{nom}'.
Le type d'entreprise est : {categorie}.
Les données complémentaires fournies par l'utilisateur pour chaque bloc sont :
{rubriques}
Si l'utilisateur a donné des données complémentaires pour un bloc, elles sont impérativement prioritaires dans la génération.
Si un bloc n'a aucune indication, génère son contenu entièrement.
Si les éléments fournis te semblent insuffisants, complète-les par d'autres éléments pertinents.

À faire impérativement :
Je veux neuf blocs distincts, rédigés en français, avec les titres en gras et des listes à puces si nécessaire :
  - Partenaires clés
  - Activités clés
  - Offre (proposition de valeur)
  - Relation client
  - Segments de clientèle
  - Ressources clés
  - Canaux de distribution
  - Structure des coûts
  - Sources de revenus
Fournis 5 à 10 points ou éléments par bloc, même plus, afin d'avoir un contenu riche et adapté, tout en restant concis."#,
        metaprompt = profile.category.metaprompt(),
        nom = profile.name,
        categorie = profile.category.label(),
        rubriques = rubriques,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn profile(category: BusinessCategory) -> BusinessProfile {
        BusinessProfile {
            name: "Acme".to_string(),
            category,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_unrecognized_category_uses_fallback_metaprompt() {
        let category: BusinessCategory = serde_json::from_str(r#""Coopérative""#).unwrap();
        assert_eq!(category.metaprompt(), METAPROMPT_AUTRE);
    }

    #[test]
    fn test_build_prompt_contains_name_and_all_labels() {
        let prompt = build_prompt(
            &profile(BusinessCategory::Startup),
            &SupplementaryFields::default(),
        );
        assert!(prompt.contains("'Acme'"));
        assert!(prompt.contains("Le type d'entreprise est : Startup."));
        for block in CanvasBlock::ALL {
            assert!(
                prompt.contains(block.label()),
                "missing label {}",
                block.label()
            );
        }
    }

    #[test]
    fn test_build_prompt_interpolates_field_values_verbatim() {
        let fields = SupplementaryFields {
            partenaires_cles: "Banques locales & <grossistes>".to_string(),
            ..SupplementaryFields::default()
        };
        let prompt = build_prompt(&profile(BusinessCategory::Pme), &fields);
        assert!(prompt.contains("Partenaires clés : Banques locales & <grossistes>"));
        // Blocks without input are marked so the generator invents content.
        assert!(prompt.contains("Sources de revenus : (aucune indication)"));
    }

    #[test]
    fn test_pme_and_startup_have_dedicated_metaprompts() {
        assert!(BusinessCategory::Pme.metaprompt().contains("PME"));
        assert!(BusinessCategory::Startup
            .metaprompt()
            .contains("Business Model Canvas"));
        assert_ne!(
            BusinessCategory::Pme.metaprompt(),
            BusinessCategory::Startup.metaprompt()
        );
    }
}
