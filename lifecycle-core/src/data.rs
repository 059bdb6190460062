//! Built-in reference content for the hotel reservation system
//!
//! Everything here is compiled into the binaries; `ReferenceData::load`
//! exists for alternative data sets with the same shape.

use crate::models::{
    Methodology, MethodologyKind, NonFunctionalRequirement, Phase, ReferenceData, Requirement,
    Role,
};

impl ReferenceData {
    /// The SDLC/STLC organizer content for the hotel reservation system
    pub fn builtin() -> Self {
        Self {
            title: "Organizador SDLC & STLC".to_string(),
            subtitle: "Sistema de Reservas para Hotel - Gestión de Procesos".to_string(),
            development: development_lifecycle(),
            testing: testing_lifecycle(),
            roles: roles(),
            non_functional: non_functional_requirements(),
        }
    }
}

fn development_lifecycle() -> Methodology {
    Methodology {
        kind: MethodologyKind::Development,
        name: "SDLC".to_string(),
        subtitle: "Software Development".to_string(),
        color: "#2563eb".to_string(),
        light_color: "#eff6ff".to_string(),
        definition: "Ciclo de Vida de Desarrollo de Software: Proceso sistemático para planificar, crear, probar y desplegar software de manera eficiente y controlada.".to_string(),
        highlights: vec![
            "Planificación".to_string(),
            "Desarrollo".to_string(),
            "Implementación".to_string(),
        ],
        phases: vec![
            Phase::new(
                "Planificación",
                "Identificar requerimientos del sistema de reservas, definir alcance, recursos y cronograma. Para el hotel, se determinan necesidades como reservas online, gestión de habitaciones y reporting.",
                "bi bi-calendar-check",
            )
            .related_to(
                "Análisis de requerimientos de pruebas",
                "Durante la planificación del SDLC, el equipo de pruebas comienza a analizar qué aspectos del sistema de reservas requerirán verificación, como la disponibilidad de habitaciones en tiempo real y la integración con pasarelas de pago.",
            ),
            Phase::new(
                "Análisis de requisitos",
                "Realizar entrevistas con personal del hotel, definir historias de usuario (ej: 'Como cliente quiero reservar una habitación online'), casos de uso y observación de procesos actuales.",
                "bi bi-clipboard-data",
            )
            .related_to(
                "Planificación de pruebas",
                "Con los requisitos definidos, el equipo STLC planifica cómo probar cada funcionalidad: tipos de pruebas necesarias, recursos requeridos y cronograma para validar el sistema de reservas.",
            ),
            Phase::new(
                "Diseño del sistema",
                "Definir arquitectura del sistema de reservas, interfaces de usuario, diseño de base de datos para habitaciones, clientes y reservas, y APIs de integración con sistemas de pago.",
                "bi bi-diagram-3",
            )
            .related_to(
                "Diseño de casos de prueba",
                "A partir de los diseños del sistema, el equipo de pruebas diseña casos específicos para validar cada componente: flujos de reserva, cancelaciones, gestión de habitaciones y reportes.",
            ),
            Phase::new(
                "Desarrollo",
                "Codificación del sistema de reservas: frontend para la web del hotel, backend con lógica de negocio, integración con pasarela de pagos y base de datos.",
                "bi bi-code-slash",
            )
            .related_to(
                "Configuración del entorno",
                "Mientras los desarrolladores codifican, el equipo de pruebas prepara los entornos necesarios para evaluar el sistema: servidores, bases de datos de prueba y herramientas de automatización.",
            ),
            Phase::new(
                "Pruebas",
                "Validación funcional (reservas, cancelaciones, consultas) y no funcional (rendimiento con múltiples usuarios simultáneos, seguridad de datos de clientes).",
                "bi bi-bug-fill",
            )
            .related_to(
                "Ejecución de pruebas",
                "En esta fase ambos ciclos se sincronizan: los desarrolladores corrigen errores reportados por el equipo de pruebas, quien ejecuta los casos diseñados para el sistema de reservas.",
            ),
            Phase::new(
                "Implementación/Despliegue",
                "Paso a producción: despliegue en servidores del hotel, migración de datos existentes, capacitación al personal y lanzamiento público del sistema.",
                "bi bi-rocket-takeoff",
            )
            .related_to(
                "Cierre de pruebas",
                "El equipo de pruebas realiza las verificaciones finales en el entorno de producción y genera el reporte de cierre, confirmando que el sistema de reservas cumple con los criterios de calidad establecidos.",
            ),
            Phase::new(
                "Mantenimiento",
                "Corrección de errores reportados (ej: problemas con tipos de habitación), implementación de mejoras (nuevos métodos de pago) y actualizaciones periódicas.",
                "bi bi-tools",
            )
            .related_to(
                "Pruebas de regresión",
                "Para cada actualización del sistema, el equipo de pruebas ejecuta pruebas de regresión para asegurar que los cambios no afecten funcionalidades existentes del sistema de reservas.",
            ),
        ],
    }
}

fn testing_lifecycle() -> Methodology {
    Methodology {
        kind: MethodologyKind::Testing,
        name: "STLC".to_string(),
        subtitle: "Software Testing".to_string(),
        color: "#059669".to_string(),
        light_color: "#ecfdf5".to_string(),
        definition: "Ciclo de Vida de Pruebas de Software: Proceso sistemático para verificar y validar que el software cumple con los requisitos establecidos y estándares de calidad.".to_string(),
        highlights: vec![
            "Análisis".to_string(),
            "Pruebas".to_string(),
            "Validación".to_string(),
        ],
        phases: vec![
            Phase::new(
                "Análisis de requerimientos de pruebas",
                "Determinar qué se va a probar en el sistema de reservas: funcionalidades críticas (reservas, cancelaciones), requisitos no funcionales (tiempos de respuesta, seguridad) y compatibilidad con dispositivos.",
                "bi bi-search",
            )
            .related_to(
                "Planificación",
                "El equipo de pruebas analiza los requisitos iniciales del sistema de reservas para identificar qué aspectos requieren verificación y validación.",
            ),
            Phase::new(
                "Planificación de pruebas",
                "Seleccionar estrategia de pruebas (manual/automática), definir criterios de entrada/salida para cada fase, asignar recursos y elaborar cronograma para las pruebas del sistema de reservas.",
                "bi bi-kanban",
            )
            .related_to(
                "Análisis de requisitos",
                "Con base en los requisitos documentados, el equipo STLC planifica las actividades de prueba para el sistema de reservas, coordinándose con el cronograma de desarrollo.",
            ),
            Phase::new(
                "Diseño de casos de prueba",
                "Preparar entradas (datos de reserva), salidas esperadas (confirmación), escenarios de prueba (reserva exitosa, habitación no disponible) y datos de prueba para todas las funcionalidades.",
                "bi bi-pencil-square",
            )
            .related_to(
                "Diseño del sistema",
                "A partir de los diseños técnicos, se crean casos de prueba detallados para validar cada componente del sistema de reservas.",
            ),
            Phase::new(
                "Configuración del entorno",
                "Preparar servidores de prueba, bases de datos con información de habitaciones y reservas, herramientas de testing y configurar entorno similar a producción para validar el sistema.",
                "bi bi-gear-fill",
            )
            .related_to(
                "Desarrollo",
                "Mientras los desarrolladores codifican, el equipo de pruebas prepara los ambientes necesarios para evaluar el sistema de reservas.",
            ),
            Phase::new(
                "Ejecución de pruebas",
                "Ejecutar casos de prueba para el sistema de reservas: registrar resultados, reportar defectos (ej: error al aplicar descuentos) y verificar correcciones.",
                "bi bi-play-circle-fill",
            )
            .related_to(
                "Pruebas",
                "Se ejecutan las pruebas planificadas y se reportan los defectos encontrados en el sistema de reservas para su corrección.",
            ),
            Phase::new(
                "Cierre de pruebas",
                "Evaluar métricas (cobertura, defectos encontrados/corregidos), elaborar reporte final de pruebas y obtener aprobación para pasar a producción el sistema de reservas.",
                "bi bi-flag-fill",
            )
            .related_to(
                "Implementación/Despliegue",
                "Al finalizar las pruebas, se genera el reporte final que avala la calidad del sistema de reservas para su despliegue a producción.",
            ),
            Phase::new(
                "Pruebas de regresión",
                "Pruebas de regresión para asegurar que cambios no rompan funcionalidad existente del sistema de reservas: suites automatizadas sobre reservas, pagos y gestión de habitaciones tras cada versión.",
                "bi bi-arrow-repeat",
            )
            .related_to(
                "Mantenimiento",
                "Cada corrección o mejora publicada en mantenimiento dispara la suite de regresión antes de llegar a los huéspedes.",
            ),
        ],
    }
}

fn requirement(id: &str, title: &str, description: &str, test_cases: &[&str]) -> Requirement {
    Requirement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        test_cases: test_cases.iter().map(|t| t.to_string()).collect(),
    }
}

fn roles() -> Vec<Role> {
    vec![
        Role {
            key: "huesped".to_string(),
            name: "Huésped".to_string(),
            description: "Cliente que busca, reserva y administra sus estancias desde la web del hotel.".to_string(),
            icon: "bi bi-person".to_string(),
            requirements: vec![
                requirement(
                    "RF-01",
                    "Consultar disponibilidad",
                    "El huésped consulta habitaciones disponibles por rango de fechas, número de personas y tipo de habitación.",
                    &[
                        "Búsqueda con fechas válidas devuelve solo habitaciones libres en todo el rango",
                        "Fecha de salida anterior a la de entrada muestra un mensaje de validación",
                        "Búsqueda sin resultados sugiere fechas alternativas",
                    ],
                ),
                requirement(
                    "RF-02",
                    "Reservar habitación online",
                    "El huésped reserva una habitación, paga con tarjeta y recibe una confirmación por correo electrónico.",
                    &[
                        "Reserva exitosa genera código de confirmación y envía correo",
                        "Pago rechazado no bloquea la habitación",
                        "Dos huéspedes reservando la última habitación a la vez: solo una reserva se confirma",
                    ],
                ),
                requirement(
                    "RF-03",
                    "Cancelar reserva",
                    "El huésped cancela una reserva aplicando la política de cancelación vigente.",
                    &[
                        "Cancelación dentro del plazo gratuito reembolsa el importe completo",
                        "Cancelación fuera de plazo aplica la penalización configurada",
                        "La habitación cancelada vuelve a estar disponible de inmediato",
                    ],
                ),
            ],
        },
        Role {
            key: "recepcionista".to_string(),
            name: "Recepcionista".to_string(),
            description: "Personal de recepción que gestiona llegadas, salidas y cambios de reservas.".to_string(),
            icon: "bi bi-person-badge".to_string(),
            requirements: vec![
                requirement(
                    "RF-04",
                    "Registrar check-in",
                    "El recepcionista registra la llegada del huésped y asigna la habitación.",
                    &[
                        "Check-in con reserva confirmada cambia el estado de la habitación a ocupada",
                        "Check-in sin reserva permite crear una reserva en mostrador",
                    ],
                ),
                requirement(
                    "RF-05",
                    "Registrar check-out y facturar",
                    "El recepcionista registra la salida, agrega consumos y emite la factura.",
                    &[
                        "Factura incluye noches, consumos e impuestos correctos",
                        "Check-out libera la habitación para limpieza",
                    ],
                ),
                requirement(
                    "RF-06",
                    "Modificar reserva",
                    "El recepcionista cambia fechas o tipo de habitación de una reserva existente.",
                    &[
                        "Cambio a fechas disponibles recalcula la tarifa",
                        "Cambio a fechas sin disponibilidad conserva la reserva original",
                    ],
                ),
            ],
        },
        Role {
            key: "administrador".to_string(),
            name: "Administrador".to_string(),
            description: "Responsable de la configuración del sistema: habitaciones, tarifas y usuarios.".to_string(),
            icon: "bi bi-gear".to_string(),
            requirements: vec![
                requirement(
                    "RF-07",
                    "Gestionar habitaciones y tarifas",
                    "El administrador crea, edita y desactiva habitaciones y define tarifas por temporada.",
                    &[
                        "Tarifa de temporada alta se aplica solo dentro de su rango de fechas",
                        "Habitación desactivada no aparece en búsquedas",
                    ],
                ),
                requirement(
                    "RF-08",
                    "Gestionar usuarios y permisos",
                    "El administrador da de alta personal del hotel y asigna roles con permisos.",
                    &[
                        "Recepcionista no puede acceder a la configuración de tarifas",
                        "Usuario desactivado no puede iniciar sesión",
                    ],
                ),
            ],
        },
        Role {
            key: "gerente".to_string(),
            name: "Gerente".to_string(),
            description: "Dirección del hotel que consulta indicadores de ocupación e ingresos.".to_string(),
            icon: "bi bi-graph-up".to_string(),
            requirements: vec![
                requirement(
                    "RF-09",
                    "Generar reporte de ocupación",
                    "El gerente obtiene el porcentaje de ocupación por día, semana y mes.",
                    &[
                        "Ocupación calculada coincide con las reservas registradas",
                        "Reporte exportable a PDF y hoja de cálculo",
                    ],
                ),
                requirement(
                    "RF-10",
                    "Consultar ingresos por periodo",
                    "El gerente consulta ingresos agrupados por periodo, canal y tipo de habitación.",
                    &[
                        "Ingresos excluyen reservas canceladas con reembolso total",
                        "Filtro por canal suma exactamente el total general",
                    ],
                ),
            ],
        },
    ]
}

fn non_functional(
    id: &str,
    category: &str,
    title: &str,
    description: &str,
    metric: &str,
    test_cases: &[&str],
) -> NonFunctionalRequirement {
    NonFunctionalRequirement {
        id: id.to_string(),
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        metric: metric.to_string(),
        test_cases: test_cases.iter().map(|t| t.to_string()).collect(),
    }
}

fn non_functional_requirements() -> Vec<NonFunctionalRequirement> {
    vec![
        non_functional(
            "RNF-01",
            "Rendimiento",
            "Tiempo de respuesta de búsqueda",
            "La búsqueda de disponibilidad responde rápido incluso en temporada alta.",
            "p95 menor a 2 s con 500 usuarios simultáneos",
            &[
                "Prueba de carga con 500 usuarios virtuales durante 15 minutos",
                "Prueba de estrés hasta encontrar el punto de degradación",
            ],
        ),
        non_functional(
            "RNF-02",
            "Seguridad",
            "Protección de datos de pago",
            "Los datos de tarjetas nunca se almacenan en claro y todo el tráfico viaja cifrado.",
            "Cumplimiento PCI DSS y TLS 1.2 o superior",
            &[
                "Escaneo de vulnerabilidades OWASP Top 10",
                "Verificación de que los logs no contienen números de tarjeta",
            ],
        ),
        non_functional(
            "RNF-03",
            "Disponibilidad",
            "Disponibilidad del servicio de reservas",
            "El sistema de reservas online está disponible de forma continua.",
            "99.5 % mensual",
            &[
                "Simulación de caída de un nodo de aplicación sin pérdida de reservas",
                "Restauración de respaldo de base de datos en menos de 1 hora",
            ],
        ),
        non_functional(
            "RNF-04",
            "Usabilidad",
            "Reserva en pocos pasos",
            "Un huésped completa una reserva sin ayuda.",
            "Reserva completa en 5 pasos o menos",
            &[
                "Prueba de usabilidad con 5 usuarios reales",
                "Verificación de accesibilidad WCAG 2.1 nivel AA",
            ],
        ),
        non_functional(
            "RNF-05",
            "Compatibilidad",
            "Navegadores y dispositivos",
            "La web del hotel funciona en navegadores de escritorio y móviles actuales.",
            "Últimas 2 versiones de Chrome, Firefox, Safari y Edge",
            &[
                "Matriz de pruebas cross-browser del flujo de reserva",
                "Prueba de diseño responsivo en pantallas de 360 px",
            ],
        ),
    ]
}
