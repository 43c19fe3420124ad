//! Fixed demonstration transcript used when no page image is available.

/// Transcript of El Martillo, issue 1609 (Chiclayo, 5 August 1916).
pub const DEMO_TEXT: &str = r#"
PERIÓDICO EL MARTILLO
Edición No. 1609 - 5 de agosto de 1916
Chiclayo, Perú

==========================================================
EL PERIODISMO DEPARTAMENTAL
Por F. A. Herrera
==========================================================

En ninguna otra sección de la República, excepción hecha del Lima, se ha cultivado más
la afición al periodismo, que en la nuestra. Creemos no exagerar ni darnos de excesivamente
vanidosos al proclamar esta verdad sobre este particular, que no somos los primeros en declarar.

PERIÓDICOS HISTÓRICOS DE CHICLAYO
--------------------------------------------------
Han existido numerosos periódicos que guiaron la opinión pública en Chiclayo, entre ellos:
'El Ferrocarril', 'A cierta', 'El Pueblo', 'El Siglo XX', 'La Prensa Libre',
'El Tiempo', 'La Voz del Pueblo', 'La Labra', 'El Zurriaga' y otros.

PERIODISMO EN MONSEFÚ
--------------------------------------------------
En Monsefú se han editado: 'El Progreso' (fundado por el señor Carmona), 'El Centinela',
'La Alianza', 'El Mensajero', 'El Independiente', 'El Heraldo', 'El Lábaro',
'El Pensamiento', 'La Voz del Pueblo', 'La Labor', 'La Juventud' y 'El Liberal'.

PERIÓDICOS DE FERREÑAFE
--------------------------------------------------
Entre los pueblos de la vecina Provincia solo Ferreñafe ha tenido prensa departamental
con su 'Damián' fundado y dirigido por el señor Nicanor M. Carmona.

EL PRIMER PERIÓDICO EN CHICLAYO
--------------------------------------------------
En Chiclayo, el primer periódico que se publicó fue 'El Chiclayano', por el señor
José Manuel Soto, apareciendo posteriormente 'El Comercial', 'El Continente',
'El Progreso', 'El Norte', 'El Republicano', 'La Verdad', 'El Comercio', 'La Provincia'.

REFLEXIÓN SOBRE EL PERIODISMO DEPARTAMENTAL
--------------------------------------------------
La vida actual del periodismo es de esfuerzos y de constante lucha. Un periódico no se
sostiene si no impone sacrificios de todo género, especialmente económicos, al fin se
tendrá que imponer la publicidad para venir de los pueblos con respeto a la sociedad.

==========================================================
ANUNCIOS
==========================================================

RÓMULO MENCHOLA
VENDEDOR Y COBRADOR
de las afamadas máquinas Singer Sewing Machine

==========================================================
Dirección: Calle Verónica 18, Chiclayo
Fundado: 8 de febrero de 1903
Precio: 4 centavos por número
==========================================================
"#;
