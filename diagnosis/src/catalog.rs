//! Static diagnostic table and keyword index.
//!
//! The content is demonstration data in Brazilian Portuguese. Both tables are
//! ordered: the keyword index is scanned front to back by the matcher, so the
//! position of a keyword decides which diagnosis wins when an input mentions
//! several of them.

use crate::types::*;

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

static DIAGNOSES: [DiagnosisRecord; 4] = [
    DiagnosisRecord {
        id: "freios-001",
        key: DiagnosisKey::Freios,
        zone: Some(VehicleZone::Brakes),
        fault: "Desgaste das Pastilhas de Freio",
        urgency: Urgency::High,
        description: "As pastilhas de freio apresentam desgaste excessivo, reduzindo a capacidade de frenagem do veículo. Isso compromete a segurança e pode danificar os discos de freio.",
        part: PartDescriptor {
            name: "Pastilha de Freio Dianteira",
            image: PLACEHOLDER_IMAGE,
            function: "Responsável por criar atrito contra o disco de freio, convertendo energia cinética em calor para desacelerar o veículo.",
            symptoms: &[
                "Ruído de chiado ao frear",
                "Pedal de freio esponjoso",
                "Aumento da distância de frenagem",
                "Vibração ao frear",
            ],
        },
        action: RecommendedAction {
            steps: &[
                "Suspender o veículo e remover as rodas",
                "Remover o cáliper de freio",
                "Retirar as pastilhas antigas",
                "Limpar o suporte e aplicar graxa nos pontos de contato",
                "Instalar as novas pastilhas",
                "Remontar o cáliper e rodas",
                "Testar o sistema de freios",
            ],
            complexity: Complexity::Moderate,
            tools: &[
                "Chave de roda",
                "Macaco hidráulico",
                "Chave Allen",
                "Graxa para freios",
                "Saca-pinos",
            ],
            time_estimate: "1-2 horas",
        },
        structured_prompt: StructuredPrompt {
            symptom: "ruido_frenagem",
            location: "sistema_freios",
            condition: "ao_frear",
            severity: "alta",
        },
    },
    DiagnosisRecord {
        id: "motor-001",
        key: DiagnosisKey::Motor,
        zone: Some(VehicleZone::Engine),
        fault: "Superaquecimento do Motor",
        urgency: Urgency::High,
        description: "O sistema de arrefecimento não está funcionando corretamente, causando elevação anormal da temperatura do motor. Pode indicar problema na bomba d'água ou radiador.",
        part: PartDescriptor {
            name: "Radiador e Bomba D'água",
            image: PLACEHOLDER_IMAGE,
            function: "O radiador dissipa o calor do líquido de arrefecimento, enquanto a bomba d'água circula o fluido pelo motor para manter a temperatura ideal de funcionamento.",
            symptoms: &[
                "Ponteiro de temperatura no vermelho",
                "Vapor saindo do capô",
                "Perda de líquido de arrefecimento",
                "Luz de alerta de temperatura acesa",
            ],
        },
        action: RecommendedAction {
            steps: &[
                "Desligar o motor e aguardar esfriar",
                "Verificar nível do líquido de arrefecimento",
                "Inspecionar mangueiras e conexões",
                "Testar funcionamento do ventilador",
                "Verificar estado da bomba d'água",
                "Realizar teste de pressão do sistema",
                "Substituir componentes defeituosos",
            ],
            complexity: Complexity::Complex,
            tools: &[
                "Kit de teste de pressão",
                "Termômetro infravermelho",
                "Chaves combinadas",
                "Recipiente para drenagem",
            ],
            time_estimate: "2-4 horas",
        },
        structured_prompt: StructuredPrompt {
            symptom: "superaquecimento",
            location: "motor",
            condition: "em_funcionamento",
            severity: "critica",
        },
    },
    DiagnosisRecord {
        id: "suspensao-001",
        key: DiagnosisKey::Suspensao,
        zone: Some(VehicleZone::FrontSuspension),
        fault: "Desgaste da Bieleta da Barra Estabilizadora",
        urgency: Urgency::Medium,
        description: "A bieleta da barra estabilizadora está desgastada, causando ruídos de batida ao passar em irregularidades. Afeta a estabilidade do veículo em curvas.",
        part: PartDescriptor {
            name: "Bieleta da Barra Estabilizadora",
            image: PLACEHOLDER_IMAGE,
            function: "Conecta a barra estabilizadora à suspensão, transmitindo forças que reduzem a inclinação da carroceria em curvas e melhoram a dirigibilidade.",
            symptoms: &[
                "Ruído de batida seca ao passar em buracos",
                "Estalos ao virar o volante",
                "Instabilidade em curvas",
                "Folga perceptível na suspensão",
            ],
        },
        action: RecommendedAction {
            steps: &[
                "Elevar o veículo com segurança",
                "Localizar a bieleta na barra estabilizadora",
                "Remover as porcas de fixação superior e inferior",
                "Retirar a bieleta antiga",
                "Instalar a nova bieleta com torque especificado",
                "Verificar alinhamento e folgas",
                "Testar em superfícies irregulares",
            ],
            complexity: Complexity::Simple,
            tools: &[
                "Chaves combinadas 13mm e 15mm",
                "Chave Allen",
                "Torquímetro",
                "WD-40",
            ],
            time_estimate: "30-45 minutos",
        },
        structured_prompt: StructuredPrompt {
            symptom: "ruido_impacto",
            location: "suspensao_dianteira",
            condition: "irregularidade_pista",
            severity: "media",
        },
    },
    DiagnosisRecord {
        id: "escapamento-001",
        key: DiagnosisKey::Escapamento,
        zone: Some(VehicleZone::Exhaust),
        fault: "Catalisador Obstruído",
        urgency: Urgency::Medium,
        description: "O catalisador apresenta obstrução ou deterioração, afetando a eficiência do motor e aumentando as emissões de poluentes.",
        part: PartDescriptor {
            name: "Catalisador",
            image: PLACEHOLDER_IMAGE,
            function: "Converte gases nocivos do escapamento (CO, HC, NOx) em gases menos prejudiciais através de reações químicas com metais preciosos.",
            symptoms: &[
                "Perda de potência do motor",
                "Aumento no consumo de combustível",
                "Fumaça escura no escapamento",
                "Cheiro forte de enxofre",
                "Luz de verificação do motor acesa",
            ],
        },
        action: RecommendedAction {
            steps: &[
                "Realizar diagnóstico eletrônico (OBD-II)",
                "Inspecionar visualmente o catalisador",
                "Verificar sensores de oxigênio",
                "Testar contrapressão do escapamento",
                "Substituir catalisador se necessário",
                "Limpar códigos de erro",
                "Realizar teste de emissões",
            ],
            complexity: Complexity::Complex,
            tools: &[
                "Scanner OBD-II",
                "Elevador automotivo",
                "Chaves de boca",
                "Manômetro de contrapressão",
            ],
            time_estimate: "2-3 horas",
        },
        structured_prompt: StructuredPrompt {
            symptom: "fumaca_ruido_escapamento",
            location: "sistema_escapamento",
            condition: "aceleracao",
            severity: "media",
        },
    },
];

/// Keyword index in table order. Keys are matched case and diacritic
/// insensitively, so accented and plain spellings may both appear.
pub static KEYWORDS: &[(&str, DiagnosisKey)] = &[
    // Freios
    ("freio", DiagnosisKey::Freios),
    ("frear", DiagnosisKey::Freios),
    ("pedal", DiagnosisKey::Freios),
    ("frenagem", DiagnosisKey::Freios),
    ("disco", DiagnosisKey::Freios),
    ("pastilha", DiagnosisKey::Freios),
    ("chiado", DiagnosisKey::Freios),
    // Motor
    ("motor", DiagnosisKey::Motor),
    ("aquecendo", DiagnosisKey::Motor),
    ("temperatura", DiagnosisKey::Motor),
    ("superaquecendo", DiagnosisKey::Motor),
    ("vapor", DiagnosisKey::Motor),
    ("radiador", DiagnosisKey::Motor),
    ("arrefecimento", DiagnosisKey::Motor),
    ("quente", DiagnosisKey::Motor),
    // Suspensão
    ("barulho", DiagnosisKey::Suspensao),
    ("suspensão", DiagnosisKey::Suspensao),
    ("suspensao", DiagnosisKey::Suspensao),
    ("buraco", DiagnosisKey::Suspensao),
    ("batida", DiagnosisKey::Suspensao),
    ("amortecedor", DiagnosisKey::Suspensao),
    ("bieleta", DiagnosisKey::Suspensao),
    ("estalo", DiagnosisKey::Suspensao),
    ("irregularidade", DiagnosisKey::Suspensao),
    // Escapamento
    ("escapamento", DiagnosisKey::Escapamento),
    ("fumaça", DiagnosisKey::Escapamento),
    ("fumaca", DiagnosisKey::Escapamento),
    ("ronco", DiagnosisKey::Escapamento),
    ("catalisador", DiagnosisKey::Escapamento),
    ("exaustão", DiagnosisKey::Escapamento),
    ("enxofre", DiagnosisKey::Escapamento),
];

/// Returns the record stored under `key`
pub fn lookup(key: DiagnosisKey) -> &'static DiagnosisRecord {
    match key {
        DiagnosisKey::Freios => &DIAGNOSES[0],
        DiagnosisKey::Motor => &DIAGNOSES[1],
        DiagnosisKey::Suspensao => &DIAGNOSES[2],
        DiagnosisKey::Escapamento => &DIAGNOSES[3],
    }
}

/// All records, in table order
pub fn all() -> &'static [DiagnosisRecord] {
    &DIAGNOSES
}

/// Keywords that point at `key`, in index order
pub fn keywords_for(key: DiagnosisKey) -> impl Iterator<Item = &'static str> {
    KEYWORDS
        .iter()
        .filter(move |(_, target)| *target == key)
        .map(|(keyword, _)| *keyword)
}
