use super::types::Category;

fn category(id: &str, name: &str, description: &str, questions: &[&str]) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        questions: questions.iter().map(|q| q.to_string()).collect(),
    }
}

/// The built-in business areas, in presentation order
pub fn builtin_categories() -> Vec<Category> {
    vec![
        category(
            "marketing",
            "Marketing y Ventas",
            "Visibilidad, atracción y conversión de clientes.",
            &[
                "Tenemos claro quién es nuestro cliente ideal.",
                "Generamos prospectos de forma constante (leads).",
                "Tenemos un proceso definido para convertir prospectos en clientes.",
            ],
        ),
        category(
            "finanzas",
            "Finanzas",
            "Control de ingresos, gastos y rentabilidad.",
            &[
                "Conozco con claridad mis números (ingresos, gastos, utilidades).",
                "Tenemos presupuesto y lo revisamos periódicamente.",
                "Sabemos qué productos o servicios son más rentables.",
            ],
        ),
        category(
            "operaciones",
            "Operaciones",
            "Entrega, calidad y consistencia del servicio.",
            &[
                "Tenemos procesos documentados para las tareas clave.",
                "Podemos entregar consistentemente sin depender de una sola persona.",
                "Los clientes reciben lo prometido en tiempo y forma.",
            ],
        ),
        category(
            "liderazgo",
            "Liderazgo y Equipo",
            "Personas, coordinación y cultura.",
            &[
                "Las responsabilidades del equipo están claras.",
                "Damos retroalimentación y seguimiento de forma regular.",
                "Hay buen clima y comunicación dentro del equipo.",
            ],
        ),
        category(
            "sistemas",
            "Sistemas y Tecnología",
            "Herramientas, automatización y datos.",
            &[
                "Usamos herramientas digitales para trabajar de forma más eficiente.",
                "Guardamos la información importante de forma organizada.",
                "Tenemos indicadores (KPIs) para tomar decisiones.",
            ],
        ),
    ]
}
