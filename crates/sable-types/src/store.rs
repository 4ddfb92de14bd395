use std::collections::HashMap;

use crate::{
    Accessibility, ClassDef, ClassId, ClassKind, ConstructorDef, FieldDef, MethodDef, Modifiers,
    PrimitiveType, Type, TypeEnv, WellKnownTypes,
};

/// In-memory [`TypeEnv`] backed by a vector of class definitions.
///
/// Adding a class fills in the pieces the language declares implicitly:
/// default superclasses, enum `values`/`valueOf`, record fields, accessors,
/// canonical constructor and `equals`/`hashCode`/`toString`.
#[derive(Debug, Clone)]
pub struct TypeStore {
    classes: Vec<ClassDef>,
    by_name: HashMap<String, ClassId>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::with_minimal_jdk()
    }
}

impl TypeStore {
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> + '_ {
        self.classes
            .iter()
            .enumerate()
            .map(|(idx, def)| (ClassId::new(idx as u32), def))
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassDef> {
        self.classes.get_mut(id.index())
    }

    /// Add a top-level class. Re-adding a name replaces the lookup entry, not the old definition.
    pub fn add_class(&mut self, mut def: ClassDef) -> ClassId {
        let id = ClassId::new(self.classes.len() as u32);
        self.complete_implicit_members(id, &mut def);

        self.by_name.insert(def.name.to_dotted(), id);
        if let Some(outer) = def.enclosing {
            if let Some(outer_def) = self.classes.get_mut(outer.index()) {
                if !outer_def.member_types.contains(&id) {
                    outer_def.member_types.push(id);
                }
            }
        }
        self.classes.push(def);
        id
    }

    /// Add `def` as a member type of `outer`. `def.name` is treated as a simple name.
    pub fn add_member_class(&mut self, outer: ClassId, mut def: ClassDef) -> ClassId {
        if let Some(outer_def) = self.class(outer) {
            let simple = def.simple_name().to_string();
            def.name = outer_def.name.child(simple.as_str());
            def.package = outer_def.package.clone();
            if outer_def.is_interface() {
                def.modifiers |= Modifiers::PUBLIC | Modifiers::STATIC;
            }
        }
        if matches!(
            def.kind,
            ClassKind::Interface | ClassKind::Enum | ClassKind::Record | ClassKind::Annotation
        ) {
            def.modifiers |= Modifiers::STATIC;
        }
        def.enclosing = Some(outer);
        self.add_class(def)
    }

    fn complete_implicit_members(&self, id: ClassId, def: &mut ClassDef) {
        let self_ty = Type::class(id, vec![]);
        let object = self.well_known.object;
        let is_object = def.name.to_dotted() == "java.lang.Object";

        if def.super_class.is_none() && !def.is_interface() && !is_object && !self.is_empty() {
            def.super_class = Some(match def.kind {
                ClassKind::Enum => Type::class(self.well_known.enum_, vec![self_ty.clone()]),
                ClassKind::Record => Type::class(self.well_known.record, vec![]),
                _ => Type::class(object, vec![]),
            });
        }

        match def.kind {
            ClassKind::Enum => {
                def.modifiers |= Modifiers::FINAL;
                for field in def.fields.iter_mut().filter(|f| f.is_enum_constant()) {
                    field.ty = self_ty.clone();
                }
                let string = Type::class(self.well_known.string, vec![]);
                let mandated = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::MANDATED;
                add_missing_method(
                    def,
                    MethodDef::new("values", vec![], Type::array(self_ty.clone()))
                        .with_modifiers(mandated),
                );
                add_missing_method(
                    def,
                    MethodDef::new("valueOf", vec![string], self_ty)
                        .with_param_names(&["name"])
                        .with_modifiers(mandated),
                );
            }
            ClassKind::Record => {
                def.modifiers |= Modifiers::FINAL;
                let components = def.record_components.clone();
                for component in &components {
                    if !def.fields.iter().any(|f| f.name == component.name) {
                        def.fields.push(FieldDef::new(
                            component.name.clone(),
                            component.ty.clone(),
                            Modifiers::PRIVATE | Modifiers::FINAL | Modifiers::MANDATED,
                        ));
                    }
                    add_missing_method(
                        def,
                        MethodDef::new(component.name.clone(), vec![], component.ty.clone())
                            .with_modifiers(Modifiers::PUBLIC | Modifiers::MANDATED),
                    );
                }
                if def.constructors.is_empty() {
                    let mut ctor = ConstructorDef::new(
                        components.iter().map(|c| c.ty.clone()).collect(),
                        Modifiers::PUBLIC | Modifiers::MANDATED,
                    );
                    ctor.param_names = components.iter().map(|c| c.name.clone()).collect();
                    def.constructors.push(ctor);
                }
                let mandated = Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::MANDATED;
                add_missing_method(
                    def,
                    MethodDef::new(
                        "equals",
                        vec![Type::class(object, vec![])],
                        Type::Primitive(PrimitiveType::Boolean),
                    )
                    .with_param_names(&["o"])
                    .with_modifiers(mandated),
                );
                add_missing_method(
                    def,
                    MethodDef::new("hashCode", vec![], Type::Primitive(PrimitiveType::Int))
                        .with_modifiers(mandated),
                );
                add_missing_method(
                    def,
                    MethodDef::new(
                        "toString",
                        vec![],
                        Type::class(self.well_known.string, vec![]),
                    )
                    .with_modifiers(mandated),
                );
            }
            ClassKind::Interface | ClassKind::Annotation => {
                for method in &mut def.methods {
                    if !method.modifiers.is_private() {
                        method.modifiers |= Modifiers::PUBLIC;
                    }
                    if !method.is_static()
                        && !method.modifiers.contains(Modifiers::DEFAULT)
                        && !method.modifiers.is_private()
                    {
                        method.modifiers |= Modifiers::ABSTRACT;
                    }
                }
                for field in &mut def.fields {
                    field.modifiers |= Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;
                }
            }
            ClassKind::Class => {
                if def.constructors.is_empty() && !is_object {
                    def.constructors.push(ConstructorDef::new(
                        vec![],
                        def.modifiers.without(
                            Modifiers::STATIC
                                | Modifiers::FINAL
                                | Modifiers::ABSTRACT
                                | Modifiers::DEPRECATED,
                        ),
                    ));
                }
            }
        }
    }

    /// A store holding the handful of `java.lang`/`java.io` types the language refers to.
    pub fn with_minimal_jdk() -> Self {
        let placeholder = ClassId::new(0);
        let mut store = TypeStore {
            classes: Vec::new(),
            by_name: HashMap::new(),
            well_known: WellKnownTypes {
                object: placeholder,
                string: placeholder,
                cloneable: placeholder,
                serializable: placeholder,
                enum_: placeholder,
                record: placeholder,
                throwable: placeholder,
                exception: placeholder,
                boxes: [placeholder; 8],
            },
        };

        let boolean = Type::Primitive(PrimitiveType::Boolean);
        let int = Type::Primitive(PrimitiveType::Int);
        let public = Modifiers::PUBLIC;
        let public_static = Modifiers::PUBLIC | Modifiers::STATIC;
        let constant = Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL;

        // `Object` must come first: it is the default superclass of everything added later.
        let object = store.add_class(
            ClassDef::new("java.lang.Object", ClassKind::Class)
                .with_constructor(ConstructorDef::new(vec![], public)),
        );
        let object_ty = Type::class(object, vec![]);

        let serializable =
            store.add_class(ClassDef::new("java.io.Serializable", ClassKind::Interface));
        let cloneable =
            store.add_class(ClassDef::new("java.lang.Cloneable", ClassKind::Interface));
        let char_sequence = store.add_class(
            ClassDef::new("java.lang.CharSequence", ClassKind::Interface)
                .with_method(MethodDef::new("length", vec![], int.clone()))
                .with_method(MethodDef::new(
                    "charAt",
                    vec![int.clone()],
                    Type::Primitive(PrimitiveType::Char),
                )),
        );
        let comparable = store.add_class(
            ClassDef::new("java.lang.Comparable", ClassKind::Interface)
                .with_type_params(&["T"])
                .with_method(
                    MethodDef::new("compareTo", vec![Type::type_var("T", None)], int.clone())
                        .with_param_names(&["o"]),
                ),
        );

        // `String` refers to itself; reserve its id before building the definition.
        let string_id = ClassId::new(store.classes.len() as u32);
        let string_ty = Type::class(string_id, vec![]);
        let string = store.add_class(
            ClassDef::new("java.lang.String", ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
                .with_interface(Type::class(serializable, vec![]))
                .with_interface(Type::class(char_sequence, vec![]))
                .with_interface(Type::class(comparable, vec![string_ty.clone()]))
                .with_method(MethodDef::new("length", vec![], int.clone()))
                .with_method(MethodDef::new("isEmpty", vec![], boolean.clone()))
                .with_method(MethodDef::new(
                    "charAt",
                    vec![int.clone()],
                    Type::Primitive(PrimitiveType::Char),
                ))
                .with_method(MethodDef::new(
                    "substring",
                    vec![int.clone()],
                    string_ty.clone(),
                ))
                .with_method(
                    MethodDef::new("compareTo", vec![string_ty.clone()], int.clone())
                        .with_param_names(&["anotherString"]),
                )
                .with_method(
                    MethodDef::new("valueOf", vec![object_ty.clone()], string_ty.clone())
                        .with_modifiers(public_static),
                )
                .with_method(
                    MethodDef::new("valueOf", vec![int.clone()], string_ty.clone())
                        .with_modifiers(public_static),
                ),
        );
        debug_assert_eq!(string, string_id);

        let class = store.add_class(
            ClassDef::new("java.lang.Class", ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
                .with_type_params(&["T"])
                .with_method(MethodDef::new("getName", vec![], string_ty.clone())),
        );

        // Object's members reference String and Class, so they are added after both exist.
        if let Some(def) = store.class_mut(object) {
            def.methods = vec![
                MethodDef::new("equals", vec![object_ty.clone()], boolean.clone())
                    .with_param_names(&["obj"]),
                MethodDef::new("hashCode", vec![], int.clone()),
                MethodDef::new("toString", vec![], string_ty.clone()),
                MethodDef::new("getClass", vec![], Type::class(class, vec![]))
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
                MethodDef::new("notify", vec![], Type::Void)
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
                MethodDef::new("notifyAll", vec![], Type::Void)
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
                MethodDef::new("wait", vec![], Type::Void)
                    .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
                MethodDef::new("clone", vec![], object_ty.clone())
                    .with_modifiers(Modifiers::PROTECTED),
                MethodDef::new("finalize", vec![], Type::Void)
                    .with_modifiers(Modifiers::PROTECTED | Modifiers::DEPRECATED),
            ];
        }

        let number = store.add_class(
            ClassDef::new("java.lang.Number", ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .with_interface(Type::class(serializable, vec![]))
                .with_method(
                    MethodDef::new("intValue", vec![], int.clone())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                )
                .with_method(
                    MethodDef::new("longValue", vec![], Type::Primitive(PrimitiveType::Long))
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                )
                .with_method(
                    MethodDef::new("doubleValue", vec![], Type::Primitive(PrimitiveType::Double))
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                ),
        );

        let mut boxes = [placeholder; 8];
        for primitive in PrimitiveType::ALL {
            let box_id = ClassId::new(store.classes.len() as u32);
            let box_ty = Type::class(box_id, vec![]);
            let prim_ty = Type::Primitive(primitive);
            let numeric = !matches!(primitive, PrimitiveType::Boolean | PrimitiveType::Char);
            let mut def = ClassDef::new(primitive.box_name(), ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
                .with_interface(Type::class(comparable, vec![box_ty.clone()]))
                .with_constructor(
                    ConstructorDef::new(vec![prim_ty.clone()], public | Modifiers::DEPRECATED),
                )
                .with_method(
                    MethodDef::new("valueOf", vec![prim_ty.clone()], box_ty.clone())
                        .with_modifiers(public_static),
                )
                .with_method(MethodDef::new(
                    format!("{}Value", primitive.keyword()),
                    vec![],
                    prim_ty.clone(),
                ));
            if numeric {
                def = def
                    .with_super(Type::class(number, vec![]))
                    .with_field(FieldDef::new("MAX_VALUE", prim_ty.clone(), constant))
                    .with_field(FieldDef::new("MIN_VALUE", prim_ty.clone(), constant));
            } else {
                def = def.with_interface(Type::class(serializable, vec![]));
            }
            if primitive == PrimitiveType::Int {
                def = def.with_method(
                    MethodDef::new("parseInt", vec![string_ty.clone()], int.clone())
                        .with_param_names(&["s"])
                        .with_modifiers(public_static),
                );
            }
            if primitive == PrimitiveType::Boolean {
                def = def
                    .with_field(FieldDef::new("TRUE", box_ty.clone(), constant))
                    .with_field(FieldDef::new("FALSE", box_ty.clone(), constant));
            }
            boxes[primitive.index()] = store.add_class(def);
        }

        let enum_ = store.add_class(
            ClassDef::new("java.lang.Enum", ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .with_type_params(&["E"])
                .with_interface(Type::class(serializable, vec![]))
                .with_interface(Type::class(comparable, vec![Type::type_var("E", None)]))
                .with_constructor(ConstructorDef::new(
                    vec![string_ty.clone(), int.clone()],
                    Modifiers::PROTECTED,
                ))
                .with_method(
                    MethodDef::new("name", vec![], string_ty.clone())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
                )
                .with_method(
                    MethodDef::new("ordinal", vec![], int.clone())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
                ),
        );
        let record = store.add_class(
            ClassDef::new("java.lang.Record", ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .with_constructor(ConstructorDef::new(vec![], Modifiers::PROTECTED))
                .with_method(
                    MethodDef::new("equals", vec![object_ty.clone()], boolean.clone())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                )
                .with_method(
                    MethodDef::new("hashCode", vec![], int.clone())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                )
                .with_method(
                    MethodDef::new("toString", vec![], string_ty.clone())
                        .with_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
                ),
        );
        let throwable = store.add_class(
            ClassDef::new("java.lang.Throwable", ClassKind::Class)
                .with_interface(Type::class(serializable, vec![]))
                .with_constructor(ConstructorDef::new(vec![], public))
                .with_constructor(ConstructorDef::new(vec![string_ty.clone()], public))
                .with_method(MethodDef::new("getMessage", vec![], string_ty.clone()))
                .with_method(MethodDef::new("printStackTrace", vec![], Type::Void)),
        );
        let exception = store.add_class(
            ClassDef::new("java.lang.Exception", ClassKind::Class)
                .with_super(Type::class(throwable, vec![]))
                .with_constructor(ConstructorDef::new(vec![], public))
                .with_constructor(ConstructorDef::new(vec![string_ty.clone()], public)),
        );
        store.add_class(
            ClassDef::new("java.lang.RuntimeException", ClassKind::Class)
                .with_super(Type::class(exception, vec![]))
                .with_constructor(ConstructorDef::new(vec![], public))
                .with_constructor(ConstructorDef::new(vec![string_ty.clone()], public)),
        );

        let double = Type::Primitive(PrimitiveType::Double);
        store.add_class(
            ClassDef::new("java.lang.Math", ClassKind::Class)
                .with_modifiers(Modifiers::PUBLIC | Modifiers::FINAL)
                .with_constructor(ConstructorDef::new(vec![], Modifiers::PRIVATE))
                .with_field(FieldDef::new("PI", double.clone(), constant))
                .with_field(FieldDef::new("E", double.clone(), constant))
                .with_method(
                    MethodDef::new("abs", vec![int.clone()], int.clone())
                        .with_modifiers(public_static),
                )
                .with_method(
                    MethodDef::new("max", vec![int.clone(), int.clone()], int.clone())
                        .with_param_names(&["a", "b"])
                        .with_modifiers(public_static),
                )
                .with_method(
                    MethodDef::new("min", vec![int.clone(), int.clone()], int.clone())
                        .with_param_names(&["a", "b"])
                        .with_modifiers(public_static),
                )
                .with_method(
                    MethodDef::new("sqrt", vec![double.clone()], double)
                        .with_modifiers(public_static),
                ),
        );

        store.well_known = WellKnownTypes {
            object,
            string,
            cloneable,
            serializable,
            enum_,
            record,
            throwable,
            exception,
            boxes,
        };
        store
    }
}

fn add_missing_method(def: &mut ClassDef, method: MethodDef) {
    let declared = def
        .methods
        .iter()
        .any(|m| m.name == method.name && m.params.len() == method.params.len());
    if !declared {
        def.methods.push(method);
    }
}

impl TypeEnv for TypeStore {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index())
    }

    fn lookup_class(&self, name: &str) -> Option<ClassId> {
        if let Some(id) = self.by_name.get(name) {
            return Some(*id);
        }
        if name.contains('.') {
            return None;
        }
        self.by_name.get(&format!("java.lang.{name}")).copied()
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

impl TypeStore {
    /// Set the workspace accessibility of a class.
    pub fn set_access(&mut self, id: ClassId, access: Accessibility) {
        if let Some(def) = self.class_mut(id) {
            def.access = access;
        }
    }
}
