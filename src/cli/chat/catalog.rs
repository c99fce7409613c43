use super::intent::Intent;

const WELCOME: &str =
    "¡Hola! Soy Nova, el asistente virtual de BotNova Studio. ¿En qué puedo ayudarte hoy?";

const GREETING: &str = "¡Hola! 👋 Bienvenido a BotNova Studio. Soy Nova, tu asistente virtual. \
¿Te gustaría conocer más sobre nuestros servicios de desarrollo web o chatbots inteligentes?";

const WEB: &str = "**Desarrollo Web Avanzado** 🚀

Creamos sitios web modernos, rápidos y optimizados que destacan tu marca. Nuestros servicios incluyen:

✅ Diseño UI/UX profesional
✅ 100% Responsive (móvil, tablet, desktop)
✅ Optimización SEO incluida
✅ Carga ultra rápida
✅ Panel de administración intuitivo

¿Te gustaría recibir una cotización personalizada?";

const CHATBOT: &str = "**Chatbots Inteligentes con IA** 🤖

Desarrollamos bots conversacionales que atienden a tus clientes 24/7:

✅ IA avanzada con procesamiento de lenguaje natural
✅ Soporte multilenguaje
✅ Integración con WhatsApp, Messenger, web y más
✅ Análisis de conversaciones en tiempo real
✅ Escalabilidad ilimitada

¡Reduce costos y mejora la experiencia de tus clientes!";

const PRICING: &str = "**Precios Personalizados** 💎

Cada proyecto es único, por eso creamos presupuestos a tu medida. Los factores que consideramos:

📊 Complejidad del proyecto
🎨 Diseño personalizado requerido
⚙️ Funcionalidades específicas
🔧 Integraciones necesarias

**¡Buena noticia!** Ofrecemos una consulta inicial gratuita. ¿Te gustaría agendar una llamada para discutir tu proyecto?";

const DELIVERY_TIME: &str = "**Tiempos de Entrega** ⏱️

Nuestros plazos estándar son:

🌐 **Página Web Informativa**: 2-3 semanas
🛒 **E-commerce**: 4-6 semanas
🤖 **Chatbot Básico**: 1-2 semanas
🤖 **Chatbot Avanzado con IA**: 3-4 semanas

Trabajamos con metodología ágil para entregas rápidas sin sacrificar calidad.";

const CONTACT: &str = "**¡Hablemos!** 📞

Puedes contactarnos por:

📧 Email: contacto@botnova.studio
📱 Teléfono: +1 (234) 567-890
💬 WhatsApp: Haz clic en el botón verde

Nuestro equipo está listo para ayudarte a transformar tu negocio digital.";

const THANKS: &str = "¡Con gusto! 😊 Si tienes más preguntas, aquí estoy para ayudarte. \
También puedes contactar directamente con nuestro equipo humano si lo prefieres.";

const FALLBACK: &str = "Entiendo tu consulta. Para darte la mejor información, te sugiero hablar \
directamente con uno de nuestros especialistas. ¿Te gustaría que te contactemos?";

/// The fixed set of canned answers Nova can send.
///
/// Lookup is total: every [`Intent`] has exactly one body, so there is no
/// miss to handle once an intent has been resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseCatalog;

impl ResponseCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn get(&self, intent: Intent) -> &'static str {
        match intent {
            Intent::Welcome => WELCOME,
            Intent::Greeting => GREETING,
            Intent::Web => WEB,
            Intent::Chatbot => CHATBOT,
            Intent::Pricing => PRICING,
            Intent::DeliveryTime => DELIVERY_TIME,
            Intent::Contact => CONTACT,
            Intent::Thanks => THANKS,
            Intent::Fallback => FALLBACK,
        }
    }

    /// Message every session opens with.
    pub fn welcome(&self) -> &'static str {
        self.get(Intent::Welcome)
    }
}
