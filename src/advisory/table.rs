/// Static advisory records, keyed by the classifier's canonical class names.

#[derive(Debug, PartialEq, Eq)]
pub struct AdvisoryRecord {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub symptoms: &'static [&'static str],
    pub organic: &'static [&'static str],
    pub chemical: &'static [&'static str],
    pub prevention: &'static [&'static str],
}

pub const FALLBACK_KEY: &str = "undetermined";

pub static RECORDS: &[AdvisoryRecord] = &[
    AdvisoryRecord {
        key: "Anthracnose",
        name: "Anthracnose",
        description: "A fungal disease that causes dark, sunken lesions on leaves, stems, and fruit.",
        symptoms: &[
            "Dark, sunken lesions on leaves",
            "Circular spots with concentric rings",
            "Premature leaf drop",
            "Fruit rot in severe cases",
        ],
        organic: &[
            "Remove and destroy infected plant parts",
            "Improve air circulation",
            "Apply copper-based fungicide",
            "Use neem oil spray",
        ],
        chemical: &[
            "Chlorothalonil fungicide",
            "Mancozeb fungicide",
            "Follow label instructions carefully",
        ],
        prevention: &[
            "Avoid overhead watering",
            "Prune for better air circulation",
            "Remove fallen leaves and debris",
            "Plant resistant varieties when available",
        ],
    },
    AdvisoryRecord {
        key: "Bacterial_Blight",
        name: "Bacterial Blight",
        description: "A bacterial disease that causes water-soaked lesions and leaf spots.",
        symptoms: &[
            "Water-soaked lesions on leaves",
            "Yellow halos around spots",
            "Leaf wilting and drop",
            "Stem cankers",
        ],
        organic: &[
            "Remove infected plant parts",
            "Apply copper-based bactericide",
            "Improve drainage",
            "Use resistant varieties",
        ],
        chemical: &[
            "Copper-based bactericides",
            "Streptomycin (if available)",
            "Follow manufacturer instructions",
        ],
        prevention: &[
            "Avoid overhead watering",
            "Disinfect pruning tools",
            "Improve soil drainage",
            "Plant resistant varieties",
        ],
    },
    AdvisoryRecord {
        key: "Black_Spot",
        name: "Black Spot",
        description: "A fungal disease characterized by black spots on leaves.",
        symptoms: &[
            "Black circular spots on leaves",
            "Yellowing around spots",
            "Premature leaf drop",
            "Reduced plant vigor",
        ],
        organic: &[
            "Remove infected leaves",
            "Apply copper fungicide",
            "Use baking soda spray",
            "Improve air circulation",
        ],
        chemical: &[
            "Chlorothalonil fungicide",
            "Myclobutanil fungicide",
            "Follow label directions",
        ],
        prevention: &[
            "Avoid wetting leaves",
            "Prune for air circulation",
            "Remove fallen leaves",
            "Plant resistant varieties",
        ],
    },
    AdvisoryRecord {
        key: "Canker",
        name: "Canker",
        description: "A bacterial or fungal disease causing sunken lesions on stems and branches.",
        symptoms: &[
            "Sunken lesions on stems",
            "Gum oozing from wounds",
            "Branch dieback",
            "Reduced fruit production",
        ],
        organic: &[
            "Prune infected branches",
            "Apply copper fungicide",
            "Improve drainage",
            "Use wound sealant",
        ],
        chemical: &[
            "Copper-based fungicides",
            "Thiophanate-methyl",
            "Follow safety instructions",
        ],
        prevention: &[
            "Avoid mechanical damage",
            "Disinfect pruning tools",
            "Improve soil drainage",
            "Plant resistant varieties",
        ],
    },
    AdvisoryRecord {
        key: "Curl_Virus",
        name: "Curl Virus",
        description: "A viral disease that causes leaf curling and distortion.",
        symptoms: &[
            "Leaf curling and distortion",
            "Yellowing of leaves",
            "Stunted growth",
            "Reduced fruit quality",
        ],
        organic: &[
            "Remove infected plants",
            "Control aphid vectors",
            "Use resistant varieties",
            "Improve plant nutrition",
        ],
        chemical: &[
            "Insecticides for aphid control",
            "Systemic treatments",
            "Follow label instructions",
        ],
        prevention: &[
            "Control aphid populations",
            "Use virus-free planting material",
            "Remove weeds",
            "Plant resistant varieties",
        ],
    },
    AdvisoryRecord {
        key: "Deficiency",
        name: "Nutrient Deficiency",
        description: "A condition caused by lack of essential nutrients in the soil.",
        symptoms: &[
            "Yellowing of leaves",
            "Stunted growth",
            "Poor fruit development",
            "Leaf drop",
        ],
        organic: &[
            "Apply compost",
            "Use organic fertilizers",
            "Test soil pH",
            "Add specific nutrients",
        ],
        chemical: &[
            "Balanced NPK fertilizer",
            "Micronutrient supplements",
            "Follow soil test recommendations",
        ],
        prevention: &[
            "Regular soil testing",
            "Balanced fertilization",
            "Proper pH maintenance",
            "Organic matter addition",
        ],
    },
    AdvisoryRecord {
        key: "Dry_Leaf",
        name: "Dry Leaf",
        description: "A condition caused by water stress or environmental factors.",
        symptoms: &[
            "Dry, brittle leaves",
            "Leaf curling",
            "Brown leaf edges",
            "Premature leaf drop",
        ],
        organic: &[
            "Increase watering frequency",
            "Improve soil moisture retention",
            "Add mulch",
            "Provide shade",
        ],
        chemical: &[
            "Water-soluble fertilizers",
            "Anti-transpirants",
            "Follow application rates",
        ],
        prevention: &[
            "Consistent watering schedule",
            "Mulch around plants",
            "Provide adequate shade",
            "Improve soil structure",
        ],
    },
    AdvisoryRecord {
        key: "Greening",
        name: "Citrus Greening (Huanglongbing)",
        description: "A bacterial disease transmitted by psyllids that causes yellowing and misshapen fruit.",
        symptoms: &[
            "Yellowing of leaves",
            "Misshapen fruit",
            "Bitter fruit taste",
            "Tree decline",
        ],
        organic: &[
            "Remove infected trees",
            "Control psyllid vectors",
            "Use resistant rootstocks",
            "Improve tree nutrition",
        ],
        chemical: &[
            "Psyllid insecticides",
            "Systemic treatments",
            "Follow integrated pest management",
        ],
        prevention: &[
            "Control psyllid populations",
            "Use disease-free planting material",
            "Regular monitoring",
            "Remove infected trees immediately",
        ],
    },
    AdvisoryRecord {
        key: "Healthy",
        name: "Healthy",
        description: "Your lemon tree appears to be in good health!",
        symptoms: &[
            "Green, vibrant leaves",
            "Normal growth patterns",
            "No visible damage",
            "Good fruit development",
        ],
        organic: &[
            "Continue current care routine",
            "Regular watering",
            "Balanced fertilization",
            "Pruning maintenance",
        ],
        chemical: &[],
        prevention: &[
            "Regular monitoring",
            "Proper watering (deep, infrequent)",
            "Adequate sunlight (6-8 hours daily)",
            "Well-draining soil",
            "Regular pruning for air circulation",
        ],
    },
    AdvisoryRecord {
        key: "Sooty_Mould",
        name: "Sooty Mould",
        description: "A fungal growth that appears as black coating on leaves, usually caused by honeydew from insects.",
        symptoms: &[
            "Black, sooty coating on leaves",
            "Reduced photosynthesis",
            "Sticky honeydew present",
            "Insect activity visible",
        ],
        organic: &[
            "Control insect pests",
            "Wash leaves with soapy water",
            "Apply neem oil",
            "Improve air circulation",
        ],
        chemical: &[
            "Insecticidal soap",
            "Horticultural oil",
            "Follow label instructions",
        ],
        prevention: &[
            "Control aphids and scale insects",
            "Regular plant inspection",
            "Maintain plant health",
            "Use beneficial insects",
        ],
    },
    AdvisoryRecord {
        key: "Spider_Mites",
        name: "Spider Mites",
        description: "Tiny arachnids that feed on plant sap, causing yellowing and stippling on leaves.",
        symptoms: &[
            "Yellow or bronze stippling on leaves",
            "Fine webbing on undersides of leaves",
            "Leaves may curl or drop prematurely",
            "Visible tiny moving dots (mites)",
        ],
        organic: &[
            "Spray with water to dislodge mites",
            "Apply neem oil spray every 7-10 days",
            "Introduce beneficial insects like ladybugs",
            "Use insecticidal soap",
        ],
        chemical: &[
            "Miticide sprays (use as last resort)",
            "Follow label instructions carefully",
        ],
        prevention: &[
            "Maintain proper humidity levels",
            "Regularly inspect plants",
            "Avoid overcrowding plants",
            "Keep plants well-watered",
        ],
    },
    AdvisoryRecord {
        key: FALLBACK_KEY,
        name: "Undetermined",
        description: "Unable to determine the specific condition from the provided image.",
        symptoms: &[
            "Image may be unclear or out of focus",
            "Symptoms not clearly visible",
            "Multiple possible conditions",
        ],
        organic: &[
            "Take a clearer, well-lit photo",
            "Focus on affected areas",
            "Consult with local agricultural extension",
        ],
        chemical: &[],
        prevention: &[
            "Use high-resolution images",
            "Ensure good lighting",
            "Capture close-up of affected areas",
            "Monitor plant regularly",
        ],
    },
];
